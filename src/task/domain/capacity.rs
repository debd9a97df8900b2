//! Capacity rules for the Top 5 priority bucket.
//!
//! The rules are pure functions over a workspace's task collection so the
//! lifecycle service can evaluate a proposed mutation without touching
//! storage. Completed tasks never count against the cap.

use super::{Priority, Task, TaskId, Workspace};

/// Maximum number of simultaneously active Top 5 tasks per workspace.
pub const TOP5_CAPACITY: usize = 5;

fn is_live_top5(task: &Task) -> bool {
    task.priority() == Priority::Top5 && !task.completed()
}

/// Returns the active Top 5 tasks in the collection, excluding at most one
/// identifier (the edit path counts tasks other than the one being edited).
#[must_use]
pub fn live_top5(tasks: &[Task], exclude: Option<&TaskId>) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| is_live_top5(task) && Some(task.id()) != exclude)
        .cloned()
        .collect()
}

/// Returns the number of active Top 5 tasks, excluding at most one id.
#[must_use]
pub fn live_top5_count(tasks: &[Task], exclude: Option<&TaskId>) -> usize {
    tasks
        .iter()
        .filter(|task| is_live_top5(task) && Some(task.id()) != exclude)
        .count()
}

/// Returns whether the collection can take another active Top 5 task.
#[must_use]
pub fn has_top5_capacity(tasks: &[Task], exclude: Option<&TaskId>) -> bool {
    live_top5_count(tasks, exclude) < TOP5_CAPACITY
}

/// Snapshot of a full Top 5 bucket, handed to the caller so it can offer
/// the resolution choice (move the candidate to Urgent, or replace one of
/// the occupants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityConflict {
    workspace: Workspace,
    occupants: Vec<Task>,
}

impl CapacityConflict {
    /// Returns the workspace whose bucket is full.
    #[must_use]
    pub const fn workspace(&self) -> Workspace {
        self.workspace
    }

    /// Returns the tasks currently occupying the Top 5 slots.
    #[must_use]
    pub fn occupants(&self) -> &[Task] {
        &self.occupants
    }
}

/// Evaluates whether a candidate Top 5 task fits the workspace collection.
///
/// Returns `Some` exactly when every slot is taken; the descriptor carries
/// the current occupants. `tasks` must be the candidate workspace's
/// collection; `exclude` omits the task being edited from the count.
#[must_use]
pub fn evaluate_top5_candidate(
    tasks: &[Task],
    workspace: Workspace,
    exclude: Option<&TaskId>,
) -> Option<CapacityConflict> {
    let occupants = live_top5(tasks, exclude);
    (occupants.len() >= TOP5_CAPACITY).then(|| CapacityConflict {
        workspace,
        occupants,
    })
}
