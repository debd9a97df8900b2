//! Debounced autosave for in-place edits.
//!
//! Field edits are saved after a quiescence window rather than on every
//! keystroke, keeping write volume down without letting the stored record
//! go stale for longer than the caller expects.

use crate::task::domain::{Task, TaskId};
use crate::task::ports::TaskRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Default quiescence window before an edit is persisted.
pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(750);

/// Per-record cancelable delayed saves.
///
/// Scheduling a save for a task id supersedes any save still waiting for
/// the same id: the older one is cancelled and the window restarts with
/// the newer record. Save failures are logged, not surfaced; a caller that
/// needs certainty must re-fetch (failed mutations mean "state unknown").
/// Dropping the scheduler does not cancel saves already in flight.
#[derive(Debug)]
pub struct DebouncedAutosave<R> {
    repository: Arc<R>,
    delay: Duration,
    pending: Mutex<HashMap<TaskId, JoinHandle<()>>>,
}

impl<R> DebouncedAutosave<R>
where
    R: TaskRepository + 'static,
{
    /// Creates a scheduler with the default quiescence window.
    #[must_use]
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_delay(repository, DEFAULT_AUTOSAVE_DELAY)
    }

    /// Creates a scheduler with a custom quiescence window.
    #[must_use]
    pub fn with_delay(repository: Arc<R>, delay: Duration) -> Self {
        Self {
            repository,
            delay,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Schedules `task` to be persisted once its quiescence window
    /// elapses, superseding any pending save for the same id.
    pub fn schedule(&self, task: Task) {
        let id = task.id().clone();
        let repository = Arc::clone(&self.repository);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = repository.store(&task).await {
                warn!(task = %task.id(), error = %err, "debounced save failed");
            }
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                if let Some(superseded) = pending.insert(id, handle) {
                    superseded.abort();
                }
            }
            Err(_) => {
                handle.abort();
                warn!(task = %id, "autosave state poisoned; dropping scheduled save");
            }
        }
    }

    /// Cancels the pending save for a task id, if one is still waiting.
    pub fn cancel(&self, id: &TaskId) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(handle) = pending.remove(id)
        {
            handle.abort();
        }
    }
}
