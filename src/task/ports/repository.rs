//! Repository port for workspace-scoped task persistence.

use crate::task::domain::{Task, TaskId, Workspace};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// Every operation is scoped to a single workspace. `store` and
/// `store_many` are blind upserts: the record at an id is fully replaced,
/// with no existence precondition, matching the write semantics of the
/// backing hash. Callers must treat a failed mutation as "state unknown"
/// and re-fetch before trusting any local copy.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task in the workspace's collection.
    ///
    /// A workspace with no collection yields an empty vec, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn list(&self, workspace: Workspace) -> TaskRepositoryResult<Vec<Task>>;

    /// Looks up one task by identifier within a workspace.
    ///
    /// Returns `None` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn find(&self, workspace: Workspace, id: &TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Persists one task into its workspace's collection (full replace).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists several tasks into one workspace's collection as a single
    /// atomic write.
    ///
    /// An empty slice is a no-op. The conflict-resolution swap (demote one
    /// task, promote another) relies on this batch being applied as one
    /// write so a partial demote-without-promote state cannot occur.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::WorkspaceMismatch`] when a task does
    /// not belong to `workspace`, or [`TaskRepositoryError::Persistence`]
    /// when storage fails.
    async fn store_many(
        &self,
        workspace: Workspace,
        tasks: &[Task],
    ) -> TaskRepositoryResult<()>;

    /// Removes one task from a workspace's collection.
    ///
    /// Deleting an id that does not exist is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when storage fails.
    async fn delete(&self, workspace: Workspace, id: &TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A batch write contained a task from a different workspace.
    #[error("task {id} does not belong to workspace {expected}")]
    WorkspaceMismatch {
        /// Identifier of the offending task.
        id: TaskId,
        /// Workspace the batch was scoped to.
        expected: Workspace,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
