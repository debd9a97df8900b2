//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod store;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use store::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};
