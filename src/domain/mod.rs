pub mod commands;
pub mod errors;
pub mod events;
pub mod fees;
pub mod item;
pub mod loan;
pub mod loyalty;
pub mod member;
pub mod statistics;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use item::{Item, ItemKind};
pub use member::Member;
pub use statistics::{MonthlyStatistics, StatisticsSnapshot};
pub use value_objects::*;
