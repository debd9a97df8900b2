//! Scheduled sweep that re-arms completed daily reminders.

use crate::task::domain::Workspace;
use crate::task::ports::{TaskRepository, TaskRepositoryResult};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Result of one sweep run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetSummary {
    /// When the sweep ran.
    pub ran_at: DateTime<Utc>,
    /// Number of reminders re-armed in each workspace, in sweep order.
    pub per_workspace: Vec<(Workspace, usize)>,
}

impl ResetSummary {
    /// Returns the number of reminders re-armed across all workspaces.
    #[must_use]
    pub fn total_reset(&self) -> usize {
        self.per_workspace.iter().map(|(_, count)| count).sum()
    }
}

/// Daily-reminder reset sweep across every known workspace.
///
/// The sweep is idempotent: a task is only touched while it is both a
/// daily reminder and completed, so an immediate second run finds nothing
/// to flip and issues no writes.
#[derive(Clone)]
pub struct DailyResetService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> DailyResetService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new sweep service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Runs the sweep: in each workspace, every completed daily reminder
    /// is flipped back to incomplete in one batch write; all other tasks
    /// are left untouched.
    ///
    /// A failure aborts the remaining workspaces but does not roll back
    /// workspaces already swept; each workspace's batch is independent.
    ///
    /// # Errors
    ///
    /// Returns the repository error that interrupted the sweep.
    pub async fn run(&self) -> TaskRepositoryResult<ResetSummary> {
        let mut per_workspace = Vec::with_capacity(Workspace::ALL.len());
        for workspace in Workspace::ALL {
            let tasks = self.repository.list(workspace).await?;
            let mut flipped = Vec::new();
            for mut task in tasks {
                if task.is_daily_reminder() && task.completed() {
                    task.set_completed(false, &*self.clock);
                    flipped.push(task);
                }
            }
            self.repository.store_many(workspace, &flipped).await?;
            if !flipped.is_empty() {
                info!(workspace = %workspace, reset = flipped.len(), "re-armed daily reminders");
            }
            per_workspace.push((workspace, flipped.len()));
        }
        Ok(ResetSummary {
            ran_at: self.clock.utc(),
            per_workspace,
        })
    }
}
