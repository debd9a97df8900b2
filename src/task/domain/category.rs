//! Task categories.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label used for filtering task lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Content production.
    Content,
    /// Operations.
    Ops,
    /// Strategy work.
    Strategy,
    /// Paid campaigns.
    Paid,
    /// Anything uncategorised.
    Other,
}

impl Category {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Content => "Content",
            Self::Ops => "Ops",
            Self::Strategy => "Strategy",
            Self::Paid => "Paid",
            Self::Other => "Other",
        }
    }
}

impl TryFrom<&str> for Category {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "content" => Ok(Self::Content),
            "ops" => Ok(Self::Ops),
            "strategy" => Ok(Self::Strategy),
            "paid" => Ok(Self::Paid),
            "other" => Ok(Self::Other),
            _ => Err(TaskDomainError::UnknownCategory(value.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
