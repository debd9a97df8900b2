//! Task aggregate root and the draft used to create one.

use super::{Category, Priority, TaskDomainError, TaskId, Workspace};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a task.
///
/// Drafts carry the caller-supplied fields; everything else (identifier,
/// notes, completion, timestamps) is defaulted when the draft is turned
/// into a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    text: String,
    priority: Priority,
    drop_dead: Option<NaiveDate>,
    category: Category,
    is_daily_reminder: bool,
    workspace: Workspace,
}

impl TaskDraft {
    /// Creates a draft with the required fields.
    ///
    /// The text is trimmed; the workspace defaults to [`Workspace::Work`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the text is empty after
    /// trimming.
    pub fn new(
        text: impl Into<String>,
        priority: Priority,
        category: Category,
    ) -> Result<Self, TaskDomainError> {
        let trimmed = text.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }
        Ok(Self {
            text: trimmed,
            priority,
            drop_dead: None,
            category,
            is_daily_reminder: false,
            workspace: Workspace::default(),
        })
    }

    /// Sets the target workspace.
    #[must_use]
    pub fn with_workspace(mut self, workspace: Workspace) -> Self {
        self.workspace = workspace;
        self
    }

    /// Sets the drop-dead date.
    #[must_use]
    pub fn with_drop_dead(mut self, drop_dead: Option<NaiveDate>) -> Self {
        self.drop_dead = drop_dead;
        self
    }

    /// Sets the daily-reminder marking.
    #[must_use]
    pub fn with_daily_reminder(mut self, is_daily_reminder: bool) -> Self {
        self.is_daily_reminder = is_daily_reminder;
        self
    }

    /// Replaces the requested priority bucket.
    #[must_use]
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the draft text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the requested priority bucket.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the drop-dead date, if set.
    #[must_use]
    pub const fn drop_dead(&self) -> Option<NaiveDate> {
        self.drop_dead
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns whether the task recurs as a daily reminder.
    #[must_use]
    pub const fn is_daily_reminder(&self) -> bool {
        self.is_daily_reminder
    }

    /// Returns the target workspace.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    text: String,
    priority: Priority,
    drop_dead: Option<NaiveDate>,
    category: Category,
    notes: String,
    completed: bool,
    is_daily_reminder: bool,
    workspace: Workspace,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted description text.
    pub text: String,
    /// Persisted priority bucket.
    pub priority: Priority,
    /// Persisted drop-dead date, if any.
    pub drop_dead: Option<NaiveDate>,
    /// Persisted category.
    pub category: Category,
    /// Persisted free-form notes.
    pub notes: String,
    /// Persisted completion state.
    pub completed: bool,
    /// Persisted daily-reminder marking.
    pub is_daily_reminder: bool,
    /// Persisted owning workspace.
    pub workspace: Workspace,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a draft, assigning a fresh identifier and
    /// applying the creation defaults (empty notes, not completed).
    #[must_use]
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            text: draft.text,
            priority: draft.priority,
            drop_dead: draft.drop_dead,
            category: draft.category,
            notes: String::new(),
            completed: false,
            is_daily_reminder: draft.is_daily_reminder,
            workspace: draft.workspace,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            text: data.text,
            priority: data.priority,
            drop_dead: data.drop_dead,
            category: data.category,
            notes: data.notes,
            completed: data.completed,
            is_daily_reminder: data.is_daily_reminder,
            workspace: data.workspace,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the description text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the priority bucket.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the drop-dead date, if set.
    #[must_use]
    pub const fn drop_dead(&self) -> Option<NaiveDate> {
        self.drop_dead
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    /// Returns the free-form notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns whether the task is completed.
    #[must_use]
    pub const fn completed(&self) -> bool {
        self.completed
    }

    /// Returns whether the task recurs as a daily reminder.
    #[must_use]
    pub const fn is_daily_reminder(&self) -> bool {
        self.is_daily_reminder
    }

    /// Returns the owning workspace.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the description text.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyText`] when the text is empty after
    /// trimming.
    pub fn set_text(
        &mut self,
        text: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let trimmed = text.into().trim().to_owned();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyText);
        }
        self.text = trimmed;
        self.touch(clock);
        Ok(())
    }

    /// Moves the task to a different priority bucket.
    pub fn set_priority(&mut self, priority: Priority, clock: &impl Clock) {
        self.priority = priority;
        self.touch(clock);
    }

    /// Replaces the drop-dead date.
    pub fn set_drop_dead(&mut self, drop_dead: Option<NaiveDate>, clock: &impl Clock) {
        self.drop_dead = drop_dead;
        self.touch(clock);
    }

    /// Replaces the category.
    pub fn set_category(&mut self, category: Category, clock: &impl Clock) {
        self.category = category;
        self.touch(clock);
    }

    /// Replaces the free-form notes.
    pub fn set_notes(&mut self, notes: impl Into<String>, clock: &impl Clock) {
        self.notes = notes.into();
        self.touch(clock);
    }

    /// Replaces the daily-reminder marking.
    pub fn set_daily_reminder(&mut self, is_daily_reminder: bool, clock: &impl Clock) {
        self.is_daily_reminder = is_daily_reminder;
        self.touch(clock);
    }

    /// Sets the completion state.
    pub fn set_completed(&mut self, completed: bool, clock: &impl Clock) {
        self.completed = completed;
        self.touch(clock);
    }

    /// Flips the completion state.
    ///
    /// Completing a Top 5 task frees its capacity slot for the next
    /// capacity check; completed tasks do not count against the cap.
    pub fn toggle_completed(&mut self, clock: &impl Clock) {
        self.completed = !self.completed;
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
