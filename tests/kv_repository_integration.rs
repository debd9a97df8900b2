//! Behavioural integration tests for [`KvTaskRepository`] over the
//! in-memory backend.
//!
//! These tests exercise the repository through realistic flows, checking
//! the collection-key layout, the decode-tolerance rules, and the batch
//! write used by the conflict-resolution swap.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use std::collections::BTreeMap;
use std::sync::Arc;

use mockable::DefaultClock;
use quintet::task::adapters::kv::collection_key;
use quintet::task::adapters::{InMemoryKeyValueStore, KvTaskRepository};
use quintet::task::domain::{Category, Priority, Task, TaskDraft, TaskId, Workspace};
use quintet::task::ports::{KeyValueStore, TaskRepository, TaskRepositoryError};
use tokio::runtime::Runtime;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime builds")
}

fn repository_over(
    store: Arc<InMemoryKeyValueStore>,
) -> KvTaskRepository<InMemoryKeyValueStore> {
    KvTaskRepository::new(store)
}

fn sample_task(text: &str, workspace: Workspace) -> Task {
    let draft = TaskDraft::new(text, Priority::Top5, Category::Content)
        .expect("valid draft text")
        .with_workspace(workspace)
        .with_drop_dead(chrono::NaiveDate::from_ymd_opt(2026, 9, 1));
    Task::new(draft, &DefaultClock)
}

#[test]
fn create_then_list_round_trips_every_field() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let repository = repository_over(Arc::new(InMemoryKeyValueStore::new()));
        let task = sample_task("quarterly narrative", Workspace::Projects);

        repository.store(&task).await.expect("store succeeds");
        let listed = repository
            .list(Workspace::Projects)
            .await
            .expect("list succeeds");

        assert_eq!(listed, vec![task]);
    });
}

#[test]
fn listing_an_uninitialised_workspace_yields_an_empty_collection() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let repository = repository_over(Arc::new(InMemoryKeyValueStore::new()));
        let listed = repository
            .list(Workspace::Personal)
            .await
            .expect("list succeeds");
        assert!(listed.is_empty());
    });
}

#[test]
fn workspaces_are_isolated_from_each_other() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let repository = repository_over(Arc::new(InMemoryKeyValueStore::new()));
        repository
            .store(&sample_task("work item", Workspace::Work))
            .await
            .expect("store succeeds");
        repository
            .store(&sample_task("personal item", Workspace::Personal))
            .await
            .expect("store succeeds");

        let work = repository.list(Workspace::Work).await.expect("list succeeds");
        let personal = repository
            .list(Workspace::Personal)
            .await
            .expect("list succeeds");

        assert_eq!(work.len(), 1);
        assert_eq!(personal.len(), 1);
        assert_eq!(work.first().expect("one work task").text(), "work item");
    });
}

#[test]
fn deleting_a_missing_id_is_a_no_op_success() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let repository = repository_over(Arc::new(InMemoryKeyValueStore::new()));
        let absent = TaskId::new();

        let outcome = repository.delete(Workspace::Work, &absent).await;
        assert!(outcome.is_ok());
    });
}

#[test]
fn batched_writes_land_together_and_check_the_workspace() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let repository = repository_over(Arc::new(InMemoryKeyValueStore::new()));
        let first = sample_task("demoted", Workspace::Work);
        let second = sample_task("promoted", Workspace::Work);

        repository
            .store_many(Workspace::Work, &[first.clone(), second.clone()])
            .await
            .expect("batch succeeds");
        let listed = repository.list(Workspace::Work).await.expect("list succeeds");
        assert_eq!(listed.len(), 2);

        let stray = sample_task("wrong partition", Workspace::Personal);
        let mismatch = repository
            .store_many(Workspace::Work, &[stray])
            .await;
        assert!(matches!(
            mismatch,
            Err(TaskRepositoryError::WorkspaceMismatch { .. })
        ));
    });
}

#[test]
fn empty_batches_issue_no_write() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repository = repository_over(Arc::clone(&store));

        repository
            .store_many(Workspace::Work, &[])
            .await
            .expect("empty batch succeeds");

        let raw = store
            .get_all(&collection_key(Workspace::Work))
            .await
            .expect("backend read succeeds");
        assert!(raw.is_none(), "no collection should have been created");
    });
}

#[test]
fn undecodable_values_are_skipped_on_read_and_left_in_storage() {
    let runtime = test_runtime();
    runtime.block_on(async {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repository = repository_over(Arc::clone(&store));
        let good = sample_task("intact record", Workspace::Work);
        repository.store(&good).await.expect("store succeeds");

        let key = collection_key(Workspace::Work);
        let mut junk = BTreeMap::new();
        junk.insert("legacy-raw".to_owned(), "just a plain string".to_owned());
        junk.insert(
            "legacy-odd".to_owned(),
            r#"{"id":"legacy-odd","text":"odd","priority":"Someday","category":"Ops"}"#
                .to_owned(),
        );
        store.set_fields(&key, &junk).await.expect("seed succeeds");

        let listed = repository.list(Workspace::Work).await.expect("list succeeds");
        assert_eq!(listed, vec![good]);

        let raw = store
            .get_all(&key)
            .await
            .expect("backend read succeeds")
            .expect("collection exists");
        assert_eq!(
            raw.get("legacy-raw").map(String::as_str),
            Some("just a plain string"),
            "unreadable values must survive untouched"
        );
        assert!(raw.contains_key("legacy-odd"));
    });
}
