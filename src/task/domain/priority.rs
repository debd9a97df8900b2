//! Priority buckets and schema-drift normalisation.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Priority bucket a task is filed under.
///
/// The canonical set is closed. Daily reminders are not a bucket: they are
/// marked by the orthogonal `is_daily_reminder` flag on the task, and
/// historical records that used a reminder pseudo-bucket are normalised on
/// read by [`Priority::from_stored`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// The capacity-limited highest-visibility bucket.
    #[serde(rename = "Top 5")]
    Top5,
    /// Needs attention soon but holds no capacity slot.
    Urgent,
    /// Everything else, unscheduled.
    Hopper,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top5 => "Top 5",
            Self::Urgent => "Urgent",
            Self::Hopper => "Hopper",
        }
    }

    /// Decodes a stored priority value, including retired schema variants.
    ///
    /// Returns the bucket plus whether the stored value implies the
    /// daily-reminder marking. Retired values map as follows:
    ///
    /// - `"Daily Reminders"` and `"Daily"` become [`Priority::Hopper`]
    ///   with the reminder marking implied.
    /// - `"Quick & Dirty"` becomes [`Priority::Hopper`].
    ///
    /// Records are rewritten in canonical form on their next write; nothing
    /// is migrated in place.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::UnknownPriority`] when the value matches
    /// neither the canonical set nor a retired variant.
    pub fn from_stored(value: &str) -> Result<(Self, bool), TaskDomainError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily reminders" | "daily" => Ok((Self::Hopper, true)),
            "quick & dirty" => Ok((Self::Hopper, false)),
            _ => Self::try_from(value).map(|priority| (priority, false)),
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "top 5" | "top5" | "top-5" => Ok(Self::Top5),
            "urgent" => Ok(Self::Urgent),
            "hopper" => Ok(Self::Hopper),
            _ => Err(TaskDomainError::UnknownPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
