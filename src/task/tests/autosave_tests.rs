//! Tests for the debounced autosave scheduler.

use super::fixtures::{self, MemoryRepository};
use crate::task::adapters::{InMemoryKeyValueStore, KvTaskRepository};
use crate::task::domain::{Priority, Workspace};
use crate::task::ports::TaskRepository;
use crate::task::services::DebouncedAutosave;
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;

const DELAY: Duration = Duration::from_millis(750);

fn scheduler() -> (DebouncedAutosave<MemoryRepository>, Arc<MemoryRepository>) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let repository = Arc::new(KvTaskRepository::new(store));
    let autosave = DebouncedAutosave::with_delay(Arc::clone(&repository), DELAY);
    (autosave, repository)
}

#[tokio::test(start_paused = true)]
async fn save_lands_after_the_quiescence_window() {
    let (autosave, repository) = scheduler();
    let task = fixtures::task("draft text", Priority::Hopper, Workspace::Work);

    autosave.schedule(task.clone());
    tokio::time::sleep(DELAY + Duration::from_millis(50)).await;

    let stored = repository
        .find(Workspace::Work, task.id())
        .await
        .expect("find should succeed");
    assert_eq!(stored, Some(task));
}

#[tokio::test(start_paused = true)]
async fn newer_edit_supersedes_the_pending_save() {
    let (autosave, repository) = scheduler();
    let clock = DefaultClock;
    let mut task = fixtures::task("first wording", Priority::Hopper, Workspace::Work);

    autosave.schedule(task.clone());
    task.set_text("second wording", &clock)
        .expect("valid edit text");
    autosave.schedule(task.clone());

    tokio::time::sleep(DELAY * 3).await;

    let tasks = repository
        .list(Workspace::Work)
        .await
        .expect("listing should succeed");
    assert_eq!(tasks.len(), 1);
    assert_eq!(
        tasks.first().expect("one record saved").text(),
        "second wording"
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_saves_never_land() {
    let (autosave, repository) = scheduler();
    let task = fixtures::task("never saved", Priority::Hopper, Workspace::Work);

    autosave.schedule(task.clone());
    autosave.cancel(task.id());
    tokio::time::sleep(DELAY * 3).await;

    let tasks = repository
        .list(Workspace::Work)
        .await
        .expect("listing should succeed");
    assert!(tasks.is_empty());
}
