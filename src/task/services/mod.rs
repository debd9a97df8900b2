//! Application services for task lifecycle orchestration.

mod autosave;
mod lifecycle;
mod reset;

pub use autosave::{DEFAULT_AUTOSAVE_DELAY, DebouncedAutosave};
pub use lifecycle::{
    AddOutcome, EditOutcome, ReplaceOutcome, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, TaskSession,
};
pub use reset::{DailyResetService, ResetSummary};
