//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task text is empty after trimming.
    #[error("task text must not be empty")]
    EmptyText,

    /// The task identifier is not a valid UUID string.
    #[error("invalid task identifier: {0}")]
    InvalidTaskId(String),

    /// The workspace name is not one of the known workspaces.
    #[error("unknown workspace: {0}")]
    UnknownWorkspace(String),

    /// The priority value is not one of the known priority buckets.
    #[error("unknown priority: {0}")]
    UnknownPriority(String),

    /// The category value is not one of the known categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// The drop-dead value is neither empty nor a parseable date.
    #[error("invalid drop-dead date: {0}")]
    InvalidDropDead(String),
}
