mod errors;
mod loan_service;
mod locks;
mod registry;
mod statistics_service;

pub use errors::{LoanApplicationError, Result};
pub use loan_service::{BorrowReceipt, ReturnReceipt, ServiceDependencies, borrow_item, return_item};
pub use locks::EntityLocks;
pub use registry::{
    TierInfo, add_item, get_item, list_items, list_members, register_member, tier_info,
};
pub use statistics_service::{list_events, reset_statistics, statistics_snapshot};
