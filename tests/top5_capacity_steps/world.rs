//! Shared world state for Top 5 capacity BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use quintet::task::adapters::{InMemoryKeyValueStore, KvTaskRepository};
use quintet::task::domain::Workspace;
use quintet::task::services::{AddOutcome, ReplaceOutcome, TaskLifecycleService, TaskSession};
use rstest::fixture;

/// Repository type used by the BDD world.
pub type MemoryRepository = KvTaskRepository<InMemoryKeyValueStore>;

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<MemoryRepository, DefaultClock>;

/// Scenario world for capacity behaviour tests.
pub struct CapacityWorld {
    pub service: TestTaskService,
    pub session: TaskSession,
    pub workspace: Workspace,
    pub last_add: Option<AddOutcome>,
    pub last_swap: Option<ReplaceOutcome>,
}

impl CapacityWorld {
    /// Creates a world over a fresh in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(KvTaskRepository::new(Arc::new(
            InMemoryKeyValueStore::new(),
        )));
        let service = TaskLifecycleService::new(repository, Arc::new(DefaultClock));
        Self {
            service,
            session: TaskSession::new(),
            workspace: Workspace::Work,
            last_add: None,
            last_swap: None,
        }
    }
}

impl Default for CapacityWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CapacityWorld {
    CapacityWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
