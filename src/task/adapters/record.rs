//! Storage and wire representation of a task record.
//!
//! Records are the JSON form written to the key-value backend and exchanged
//! over the REST adapter. Field names keep the historical camelCase wire
//! format (`dropDead`, `isDailyReminder`). Conversion into the domain
//! aggregate normalises retired schema variants; conversion out always
//! writes the canonical form.

use crate::task::domain::{
    Category, PersistedTaskData, Priority, Task, TaskDomainError, TaskId, Workspace,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date format used for the drop-dead wire field.
const DROP_DEAD_FORMAT: &str = "%Y-%m-%d";

/// Serialised task record.
///
/// Enum-valued fields are carried as raw strings so decoding stays
/// tolerant: unknown values surface as conversion errors the caller can
/// choose to skip, rather than failing the whole collection at the serde
/// layer. Missing optional fields default the way earlier schema versions
/// expect (`notes` empty, `completed` false, workspace `Work`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Opaque task identifier.
    pub id: String,
    /// Free-form description.
    pub text: String,
    /// Priority bucket name.
    pub priority: String,
    /// ISO-8601 date string; empty means unset.
    #[serde(default)]
    pub drop_dead: String,
    /// Category name.
    pub category: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
    /// Completion state.
    #[serde(default)]
    pub completed: bool,
    /// Daily-reminder marking.
    #[serde(default)]
    pub is_daily_reminder: bool,
    /// Owning workspace name.
    #[serde(default = "default_workspace")]
    pub workspace: String,
    /// Creation timestamp; absent on records from earlier schema versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Latest mutation timestamp; absent on records from earlier schema
    /// versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn default_workspace() -> String {
    Workspace::Work.as_str().to_owned()
}

impl TaskRecord {
    /// Builds the canonical record for a domain task.
    #[must_use]
    pub fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id().as_str().to_owned(),
            text: task.text().to_owned(),
            priority: task.priority().as_str().to_owned(),
            drop_dead: task
                .drop_dead()
                .map(|date| date.format(DROP_DEAD_FORMAT).to_string())
                .unwrap_or_default(),
            category: task.category().as_str().to_owned(),
            notes: task.notes().to_owned(),
            completed: task.completed(),
            is_daily_reminder: task.is_daily_reminder(),
            workspace: task.workspace().as_str().to_owned(),
            created_at: Some(task.created_at()),
            updated_at: Some(task.updated_at()),
        }
    }

    /// Converts the record into the domain aggregate.
    ///
    /// Retired schema variants are normalised here: daily-reminder
    /// pseudo-priorities set the reminder flag and land in the Hopper
    /// bucket, and records without timestamps get the Unix epoch for both.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the identifier is empty, an
    /// enum-valued field matches no known variant, or a non-empty
    /// drop-dead value fails to parse as a date.
    pub fn into_domain(self) -> Result<Task, TaskDomainError> {
        let id = TaskId::parse(&self.id)?;
        let (priority, implies_reminder) = Priority::from_stored(&self.priority)?;
        let category = Category::try_from(self.category.as_str())?;
        let workspace = Workspace::try_from(self.workspace.as_str())?;
        let drop_dead = parse_drop_dead(&self.drop_dead)?;

        Ok(Task::from_persisted(PersistedTaskData {
            id,
            text: self.text,
            priority,
            drop_dead,
            category,
            notes: self.notes,
            completed: self.completed,
            is_daily_reminder: self.is_daily_reminder || implies_reminder,
            workspace,
            created_at: self.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated_at: self.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }))
    }
}

/// Parses the drop-dead wire value.
///
/// Empty (after trimming) means unset. Plain ISO dates are the canonical
/// form; full RFC 3339 timestamps are accepted and truncated to the date.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidDropDead`] when a non-empty value
/// parses as neither.
pub fn parse_drop_dead(value: &str) -> Result<Option<NaiveDate>, TaskDomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DROP_DEAD_FORMAT) {
        return Ok(Some(date));
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| Some(timestamp.date_naive()))
        .map_err(|_| TaskDomainError::InvalidDropDead(value.to_owned()))
}
