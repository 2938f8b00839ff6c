pub mod catalogue;
pub mod event_store;
pub mod member_directory;
pub mod statistics_store;

pub use catalogue::Catalogue;
pub use event_store::EventStore;
pub use member_directory::MemberDirectory;
pub use statistics_store::StatisticsStore;
