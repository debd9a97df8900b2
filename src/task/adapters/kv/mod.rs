//! Key-value store adapter for task persistence.
//!
//! Maps a workspace's task collection onto one backend hash keyed
//! `tasks:<workspace>`, with one field per task id holding the JSON record.

use crate::task::adapters::record::TaskRecord;
use crate::task::domain::{Task, TaskId, Workspace};
use crate::task::ports::{
    KeyValueStore, TaskRepository, TaskRepositoryError, TaskRepositoryResult,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Returns the backend hash key for a workspace's collection.
#[must_use]
pub fn collection_key(workspace: Workspace) -> String {
    format!("tasks:{workspace}")
}

/// Task repository over any [`KeyValueStore`] backend.
#[derive(Debug, Clone)]
pub struct KvTaskRepository<S> {
    store: Arc<S>,
}

impl<S> KvTaskRepository<S>
where
    S: KeyValueStore,
{
    /// Creates a repository over the given backend.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

fn encode_task(task: &Task) -> TaskRepositoryResult<String> {
    serde_json::to_string(&TaskRecord::from_domain(task))
        .map_err(TaskRepositoryError::persistence)
}

/// Decodes one stored field into a task.
///
/// Values that fail to decode (legacy raw strings, malformed JSON,
/// unrecognised enum values) are skipped with a warning and left untouched
/// in storage; they are never an error and never destroyed.
fn decode_field(key: &str, field: &str, raw: &str) -> Option<Task> {
    let record = match serde_json::from_str::<TaskRecord>(raw) {
        Ok(record) => record,
        Err(err) => {
            warn!(key, field, error = %err, "skipping stored value that is not a task record");
            return None;
        }
    };
    match record.into_domain() {
        Ok(task) => Some(task),
        Err(err) => {
            warn!(key, field, error = %err, "skipping task record with unrecognised values");
            None
        }
    }
}

#[async_trait]
impl<S> TaskRepository for KvTaskRepository<S>
where
    S: KeyValueStore,
{
    async fn list(&self, workspace: Workspace) -> TaskRepositoryResult<Vec<Task>> {
        let key = collection_key(workspace);
        let fields = self
            .store
            .get_all(&key)
            .await
            .map_err(TaskRepositoryError::persistence)?;

        let Some(fields) = fields else {
            return Ok(Vec::new());
        };
        Ok(fields
            .iter()
            .filter_map(|(field, raw)| decode_field(&key, field, raw))
            .collect())
    }

    async fn find(&self, workspace: Workspace, id: &TaskId) -> TaskRepositoryResult<Option<Task>> {
        let key = collection_key(workspace);
        let fields = self
            .store
            .get_all(&key)
            .await
            .map_err(TaskRepositoryError::persistence)?;

        Ok(fields
            .as_ref()
            .and_then(|hash| hash.get(id.as_str()))
            .and_then(|raw| decode_field(&key, id.as_str(), raw)))
    }

    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let key = collection_key(task.workspace());
        let mut fields = BTreeMap::new();
        fields.insert(task.id().as_str().to_owned(), encode_task(task)?);
        self.store
            .set_fields(&key, &fields)
            .await
            .map_err(TaskRepositoryError::persistence)
    }

    async fn store_many(
        &self,
        workspace: Workspace,
        tasks: &[Task],
    ) -> TaskRepositoryResult<()> {
        let mut fields = BTreeMap::new();
        for task in tasks {
            if task.workspace() != workspace {
                return Err(TaskRepositoryError::WorkspaceMismatch {
                    id: task.id().clone(),
                    expected: workspace,
                });
            }
            fields.insert(task.id().as_str().to_owned(), encode_task(task)?);
        }
        if fields.is_empty() {
            return Ok(());
        }
        self.store
            .set_fields(&collection_key(workspace), &fields)
            .await
            .map_err(TaskRepositoryError::persistence)
    }

    async fn delete(&self, workspace: Workspace, id: &TaskId) -> TaskRepositoryResult<()> {
        self.store
            .delete_field(&collection_key(workspace), id.as_str())
            .await
            .map_err(TaskRepositoryError::persistence)
    }
}
