pub mod redb_store;
pub mod snapshot;
pub mod store;
