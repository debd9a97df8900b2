//! Port for the external key-value backend.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Result type for key-value store operations.
pub type KeyValueStoreResult<T> = Result<T, KeyValueStoreError>;

/// Hash-operation contract against the external key-value backend.
///
/// Values are raw strings; encoding structured records into string form is
/// the repository adapter's job, not the backend's. Implementations talk to
/// the real backend (or an in-memory stand-in) and surface every failure as
/// [`KeyValueStoreError`] without retrying.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads every field of the hash at `key`.
    ///
    /// Returns `None` when the hash does not exist, as a "no data" sentinel
    /// distinct from an empty mapping, so callers can tell "never
    /// initialised" from "emptied".
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend call fails.
    async fn get_all(&self, key: &str) -> KeyValueStoreResult<Option<BTreeMap<String, String>>>;

    /// Upserts one or more fields of the hash at `key` in a single write.
    ///
    /// The write is atomic from the caller's perspective: no interleaved
    /// partial state from the same call is ever visible. An empty `fields`
    /// mapping is a no-op; the backend never sees a malformed write.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend call fails.
    async fn set_fields(
        &self,
        key: &str,
        fields: &BTreeMap<String, String>,
    ) -> KeyValueStoreResult<()>;

    /// Removes one field from the hash at `key`; absent fields are not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the backend call fails.
    async fn delete_field(&self, key: &str, field: &str) -> KeyValueStoreResult<()>;
}

/// Errors returned by key-value store implementations.
#[derive(Debug, Clone, Error)]
pub enum KeyValueStoreError {
    /// Backend-level failure (connection, protocol, poisoned state).
    #[error("key-value backend failure: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl KeyValueStoreError {
    /// Wraps a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}
