//! Shared builders for task unit tests.

use crate::task::adapters::{InMemoryKeyValueStore, KvTaskRepository};
use crate::task::domain::{Category, Priority, Task, TaskDraft, Workspace};
use crate::task::services::{TaskLifecycleService, TaskSession};
use mockable::DefaultClock;
use std::sync::Arc;

/// Repository type used by unit tests.
pub type MemoryRepository = KvTaskRepository<InMemoryKeyValueStore>;

/// Lifecycle service type used by unit tests.
pub type TestService = TaskLifecycleService<MemoryRepository, DefaultClock>;

/// Bundle of the collaborators a lifecycle test needs.
pub struct TestContext {
    pub repository: Arc<MemoryRepository>,
    pub service: TestService,
    pub session: TaskSession,
}

/// Creates a lifecycle service over a fresh in-memory backend.
pub fn context() -> TestContext {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let repository = Arc::new(KvTaskRepository::new(store));
    let service = TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock));
    TestContext {
        repository,
        service,
        session: TaskSession::new(),
    }
}

/// Builds a draft in the default workspace with the `Other` category.
pub fn draft(text: &str, priority: Priority) -> TaskDraft {
    TaskDraft::new(text, priority, Category::Other).expect("valid draft text")
}

/// Builds a persisted-shape task for seeding repositories directly.
pub fn task(text: &str, priority: Priority, workspace: Workspace) -> Task {
    Task::new(
        draft(text, priority).with_workspace(workspace),
        &DefaultClock,
    )
}
