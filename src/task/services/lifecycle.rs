//! Service layer for capacity-checked task mutations and the interactive
//! conflict and deletion workflows.

use crate::task::domain::{
    CapacityConflict, Priority, Task, TaskDomainError, TaskDraft, TaskId, Workspace, capacity,
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// A capacity conflict is already awaiting resolution in this session.
    #[error("a capacity conflict is already pending resolution")]
    ConflictPending,
    /// No capacity conflict is awaiting resolution.
    #[error("no capacity conflict is pending")]
    NoPendingConflict,
    /// No deletion is awaiting confirmation.
    #[error("no deletion is pending confirmation")]
    NoPendingDelete,
    /// The task does not exist in its workspace.
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    /// The chosen replacement target is not an active Top 5 occupant.
    #[error("task {0} is not an active Top 5 occupant")]
    InvalidReplacement(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Candidate change held while a capacity conflict awaits resolution.
#[derive(Debug, Clone)]
enum PendingChange {
    /// A new task awaiting creation.
    Create(TaskDraft),
    /// An existing task edited into the Top 5 bucket; the stored record is
    /// untouched until the conflict resolves, so cancelling discards the
    /// edit without any partial state becoming visible.
    Promote(Task),
}

#[derive(Debug, Clone)]
struct PendingConflict {
    change: PendingChange,
    conflict: CapacityConflict,
}

#[derive(Debug, Clone)]
struct DeleteRequest {
    workspace: Workspace,
    id: TaskId,
}

/// Caller-owned, session-scoped workflow state.
///
/// Holds the pending-conflict state machine (idle, then pending after a
/// failed capacity check, then idle again via move-to-urgent, replace, or
/// cancel) and the deletion guard. The service keeps no workflow state of
/// its own; each client session owns one of these.
#[derive(Debug, Default)]
pub struct TaskSession {
    conflict: Option<PendingConflict>,
    delete: Option<DeleteRequest>,
}

impl TaskSession {
    /// Creates a session with no pending workflow state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the pending capacity conflict, if one awaits resolution.
    #[must_use]
    pub fn pending_conflict(&self) -> Option<&CapacityConflict> {
        self.conflict.as_ref().map(|pending| &pending.conflict)
    }

    /// Returns the deletion awaiting confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<(Workspace, &TaskId)> {
        self.delete
            .as_ref()
            .map(|request| (request.workspace, &request.id))
    }

    /// Abandons the pending capacity conflict with no side effects; a held
    /// draft is dropped and a held edit is discarded.
    pub fn cancel_conflict(&mut self) {
        self.conflict = None;
    }

    /// Marks a task as the candidate for deletion, awaiting confirmation.
    /// A previous unconfirmed candidate is replaced.
    pub fn request_delete(&mut self, workspace: Workspace, id: TaskId) {
        self.delete = Some(DeleteRequest { workspace, id });
    }

    /// Abandons the pending deletion with no side effects.
    pub fn cancel_delete(&mut self) {
        self.delete = None;
    }
}

/// Outcome of a capacity-checked create.
#[derive(Debug, Clone)]
pub enum AddOutcome {
    /// The task was created and persisted.
    Created(Task),
    /// Every Top 5 slot is taken; the draft is held in the session until
    /// the conflict is resolved or cancelled. Nothing was persisted.
    ConflictPending(CapacityConflict),
}

/// Outcome of a capacity-checked edit.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    /// The edit was persisted.
    Saved(Task),
    /// The edit promotes the task into a full Top 5 bucket; it is held in
    /// the session until the conflict is resolved or cancelled. The stored
    /// record is unchanged.
    ConflictPending(CapacityConflict),
}

/// The pair of records written by the replace resolution.
#[derive(Debug, Clone)]
pub struct ReplaceOutcome {
    /// The former occupant, moved to the Urgent bucket.
    pub demoted: Task,
    /// The candidate now holding the freed Top 5 slot.
    pub promoted: Task,
}

/// Task lifecycle orchestration service.
///
/// Capacity checks run against the snapshot fetched at operation start;
/// they are not re-validated under any lock, so two sessions racing each
/// other can exceed the cap. That limitation is accepted by design and
/// documented rather than enforced.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task in the workspace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list_tasks(&self, workspace: Workspace) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list(workspace).await?)
    }

    /// Creates a task from a draft, enforcing the Top 5 capacity rule.
    ///
    /// A draft bound for a full Top 5 bucket is not persisted; it is held
    /// in the session and the conflict descriptor is returned so the
    /// caller can offer the resolution choice.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ConflictPending`] when the session
    /// already holds an unresolved conflict, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn add_task(
        &self,
        session: &mut TaskSession,
        draft: TaskDraft,
    ) -> TaskLifecycleResult<AddOutcome> {
        if session.conflict.is_some() {
            return Err(TaskLifecycleError::ConflictPending);
        }
        if draft.priority() == Priority::Top5 {
            let tasks = self.repository.list(draft.workspace()).await?;
            if let Some(conflict) =
                capacity::evaluate_top5_candidate(&tasks, draft.workspace(), None)
            {
                let descriptor = conflict.clone();
                session.conflict = Some(PendingConflict {
                    change: PendingChange::Create(draft),
                    conflict,
                });
                return Ok(AddOutcome::ConflictPending(descriptor));
            }
        }
        let task = Task::new(draft, &*self.clock);
        self.repository.store(&task).await?;
        Ok(AddOutcome::Created(task))
    }

    /// Persists a full-record edit, enforcing the Top 5 capacity rule when
    /// the edit promotes the task from another bucket into Top 5.
    ///
    /// A promotion into a full bucket is not persisted; the edited record
    /// is held in the session and the stored record stays untouched, so
    /// cancelling leaves no partial state.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTask`] when the task is absent
    /// from its workspace, [`TaskLifecycleError::ConflictPending`] when the
    /// session already holds an unresolved conflict, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn edit_task(
        &self,
        session: &mut TaskSession,
        task: Task,
    ) -> TaskLifecycleResult<EditOutcome> {
        let tasks = self.repository.list(task.workspace()).await?;
        let stored = tasks
            .iter()
            .find(|candidate| candidate.id() == task.id())
            .ok_or_else(|| TaskLifecycleError::UnknownTask(task.id().clone()))?;

        let promotes = task.priority() == Priority::Top5 && stored.priority() != Priority::Top5;
        if promotes {
            if session.conflict.is_some() {
                return Err(TaskLifecycleError::ConflictPending);
            }
            if let Some(conflict) =
                capacity::evaluate_top5_candidate(&tasks, task.workspace(), Some(task.id()))
            {
                let descriptor = conflict.clone();
                session.conflict = Some(PendingConflict {
                    change: PendingChange::Promote(task),
                    conflict,
                });
                return Ok(EditOutcome::ConflictPending(descriptor));
            }
        }
        self.repository.store(&task).await?;
        Ok(EditOutcome::Saved(task))
    }

    /// Moves a task to a different priority bucket (the drag/move path).
    ///
    /// Equivalent to an in-place edit of the priority field; moving into
    /// Top 5 goes through the same capacity check as any other promotion.
    ///
    /// # Errors
    ///
    /// Propagates the same errors as [`Self::edit_task`].
    pub async fn move_priority(
        &self,
        session: &mut TaskSession,
        workspace: Workspace,
        id: &TaskId,
        priority: Priority,
    ) -> TaskLifecycleResult<EditOutcome> {
        let mut task = self
            .repository
            .find(workspace, id)
            .await?
            .ok_or_else(|| TaskLifecycleError::UnknownTask(id.clone()))?;
        task.set_priority(priority, &*self.clock);
        self.edit_task(session, task).await
    }

    /// Flips a task's completion state.
    ///
    /// Completing a Top 5 task frees its capacity slot for the next
    /// capacity check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::UnknownTask`] when the task is absent
    /// from the workspace, or [`TaskLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn toggle_completed(
        &self,
        workspace: Workspace,
        id: &TaskId,
    ) -> TaskLifecycleResult<Task> {
        let mut task = self
            .repository
            .find(workspace, id)
            .await?
            .ok_or_else(|| TaskLifecycleError::UnknownTask(id.clone()))?;
        task.toggle_completed(&*self.clock);
        self.repository.store(&task).await?;
        Ok(task)
    }

    /// Resolves the pending conflict by filing the candidate under Urgent,
    /// leaving the Top 5 set untouched.
    ///
    /// The pending state is cleared before the write; if the write fails
    /// the candidate is dropped and the caller must re-fetch.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NoPendingConflict`] when nothing is
    /// pending, or [`TaskLifecycleError::Repository`] when persistence
    /// fails.
    pub async fn resolve_move_to_urgent(
        &self,
        session: &mut TaskSession,
    ) -> TaskLifecycleResult<Task> {
        let pending = session
            .conflict
            .take()
            .ok_or(TaskLifecycleError::NoPendingConflict)?;
        match pending.change {
            PendingChange::Create(draft) => {
                let task = Task::new(draft.with_priority(Priority::Urgent), &*self.clock);
                self.repository.store(&task).await?;
                Ok(task)
            }
            PendingChange::Promote(mut task) => {
                task.set_priority(Priority::Urgent, &*self.clock);
                self.repository.store(&task).await?;
                Ok(task)
            }
        }
    }

    /// Resolves the pending conflict by swapping the chosen occupant out of
    /// Top 5: the occupant moves to Urgent and the candidate takes its
    /// slot, applied as one atomic repository write so a partial
    /// demote-without-promote state cannot occur.
    ///
    /// An invalid choice leaves the conflict pending so the caller can
    /// choose again.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NoPendingConflict`] when nothing is
    /// pending, [`TaskLifecycleError::InvalidReplacement`] when the chosen
    /// id is not an active Top 5 occupant, or
    /// [`TaskLifecycleError::Repository`] when persistence fails.
    pub async fn resolve_replace(
        &self,
        session: &mut TaskSession,
        replace_id: &TaskId,
    ) -> TaskLifecycleResult<ReplaceOutcome> {
        let workspace = session
            .conflict
            .as_ref()
            .map(|pending| pending.conflict.workspace())
            .ok_or(TaskLifecycleError::NoPendingConflict)?;

        // Re-read the bucket so the demotion applies to current state, not
        // the snapshot taken when the conflict was raised.
        let tasks = self.repository.list(workspace).await?;
        let mut demoted = tasks
            .iter()
            .find(|candidate| {
                candidate.id() == replace_id
                    && candidate.priority() == Priority::Top5
                    && !candidate.completed()
            })
            .cloned()
            .ok_or_else(|| TaskLifecycleError::InvalidReplacement(replace_id.clone()))?;

        let pending = session
            .conflict
            .take()
            .ok_or(TaskLifecycleError::NoPendingConflict)?;
        demoted.set_priority(Priority::Urgent, &*self.clock);
        let promoted = match pending.change {
            PendingChange::Create(draft) => Task::new(draft, &*self.clock),
            PendingChange::Promote(task) => task,
        };

        let batch = [demoted.clone(), promoted.clone()];
        self.repository.store_many(workspace, &batch).await?;
        Ok(ReplaceOutcome { demoted, promoted })
    }

    /// Confirms the pending deletion and issues the delete.
    ///
    /// Deleting an id that no longer exists is still a success (the guard
    /// is cleared either way).
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NoPendingDelete`] when no deletion is
    /// awaiting confirmation, or [`TaskLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn confirm_delete(&self, session: &mut TaskSession) -> TaskLifecycleResult<TaskId> {
        let request = session
            .delete
            .take()
            .ok_or(TaskLifecycleError::NoPendingDelete)?;
        self.repository.delete(request.workspace, &request.id).await?;
        Ok(request.id)
    }
}
