// Implementations of the usage counter store.

pub mod in_memory;
pub mod sqlite_store;

pub use in_memory::InMemoryUsageStore;
pub use sqlite_store::SqliteUsageStore;
