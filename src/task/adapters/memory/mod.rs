//! In-memory key-value store for tests and development.

use crate::task::ports::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

type HashState = BTreeMap<String, BTreeMap<String, String>>;

/// Thread-safe in-memory hash store.
///
/// Mirrors the backend's hash semantics: a hash that loses its last field
/// is dropped, so `get_all` reports it as "no data" rather than an empty
/// mapping.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    state: Arc<RwLock<HashState>>,
}

impl InMemoryKeyValueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> KeyValueStoreError {
    KeyValueStoreError::backend(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get_all(&self, key: &str) -> KeyValueStoreResult<Option<BTreeMap<String, String>>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.get(key).cloned())
    }

    async fn set_fields(
        &self,
        key: &str,
        fields: &BTreeMap<String, String>,
    ) -> KeyValueStoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .entry(key.to_owned())
            .or_default()
            .extend(fields.clone());
        Ok(())
    }

    async fn delete_field(&self, key: &str, field: &str) -> KeyValueStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(hash) = state.get_mut(key) {
            hash.remove(field);
            if hash.is_empty() {
                state.remove(key);
            }
        }
        Ok(())
    }
}
