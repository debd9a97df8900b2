//! Redis-backed key-value store.

use crate::task::ports::{KeyValueStore, KeyValueStoreError, KeyValueStoreResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::collections::BTreeMap;

/// Production [`KeyValueStore`] speaking to a Redis-compatible backend.
///
/// The connection manager multiplexes one connection and reconnects on
/// failure; cloning it is cheap, so each operation works on its own handle.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    connection: ConnectionManager,
}

impl RedisKeyValueStore {
    /// Connects to the backend at `url` (e.g. `redis://127.0.0.1:6379`).
    ///
    /// # Errors
    ///
    /// Returns [`KeyValueStoreError`] when the URL is invalid or the
    /// initial connection fails.
    pub async fn connect(url: &str) -> KeyValueStoreResult<Self> {
        let client = Client::open(url).map_err(KeyValueStoreError::backend)?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(KeyValueStoreError::backend)?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get_all(&self, key: &str) -> KeyValueStoreResult<Option<BTreeMap<String, String>>> {
        let mut connection = self.connection.clone();
        let fields: BTreeMap<String, String> = connection
            .hgetall(key)
            .await
            .map_err(KeyValueStoreError::backend)?;
        // The backend reports a missing hash as an empty reply.
        Ok((!fields.is_empty()).then_some(fields))
    }

    async fn set_fields(
        &self,
        key: &str,
        fields: &BTreeMap<String, String>,
    ) -> KeyValueStoreResult<()> {
        if fields.is_empty() {
            return Ok(());
        }
        let items: Vec<(&str, &str)> = fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();
        let mut connection = self.connection.clone();
        connection
            .hset_multiple::<_, _, _, ()>(key, &items)
            .await
            .map_err(KeyValueStoreError::backend)
    }

    async fn delete_field(&self, key: &str, field: &str) -> KeyValueStoreResult<()> {
        let mut connection = self.connection.clone();
        connection
            .hdel::<_, _, ()>(key, field)
            .await
            .map_err(KeyValueStoreError::backend)
    }
}
