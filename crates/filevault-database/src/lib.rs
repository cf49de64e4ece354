//! # filevault-database
//!
//! The storage collaborator for FileVault: the store traits the services
//! depend on, their PostgreSQL implementations, migrations, and an
//! in-memory implementation for tests and local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    AccountStore, AccountTransaction, FileStore, HistoryLedger, RoleStore, Stores, UserStore,
};
