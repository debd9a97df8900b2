//! Workspace partitions for task collections.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named partition isolating one task collection from another.
///
/// A task belongs to exactly one workspace for its lifetime; workspace
/// reassignment is not supported by the lifecycle operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Workspace {
    /// Work tasks. The default when no workspace is given.
    #[default]
    Work,
    /// Side projects.
    Projects,
    /// Personal errands.
    Personal,
}

impl Workspace {
    /// Every known workspace, in sweep order.
    pub const ALL: [Self; 3] = [Self::Work, Self::Projects, Self::Personal];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Projects => "Projects",
            Self::Personal => "Personal",
        }
    }
}

impl TryFrom<&str> for Workspace {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "work" => Ok(Self::Work),
            "projects" => Ok(Self::Projects),
            "personal" => Ok(Self::Personal),
            _ => Err(TaskDomainError::UnknownWorkspace(value.to_owned())),
        }
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
