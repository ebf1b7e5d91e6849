mod common;

use common::{new_task, USER};
use momentum::db::migrations::{get_db_version, MigrationManager};
use momentum::db::tasks::LocalStore;
use momentum::libs::error::StoreError;
use momentum::libs::manager::TaskOrderManager;
use momentum::libs::profile::ProfileService;
use momentum::libs::session::UserSession;
use momentum::libs::store::{TaskStore, UrgentTaskStore};
use momentum::libs::task::{TaskOrder, TaskUpdate};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;
use test_context::{test_context, AsyncTestContext};

struct DbContext {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl AsyncTestContext for DbContext {
    async fn setup() -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("momentum.db");
        DbContext {
            _temp_dir: temp_dir,
            path,
        }
    }
}

impl DbContext {
    fn store(&self) -> LocalStore {
        LocalStore::open(&self.path).unwrap()
    }
}

#[test_context(DbContext)]
#[tokio::test]
async fn tasks_survive_reopening(ctx: &mut DbContext) {
    let due = common::date(2024, 5, 2);
    let created = {
        let store = ctx.store();
        let mut task = new_task("Persist me", 0);
        task.description = "with a description".to_string();
        task.due_date = Some(due);
        store.create(USER, &task).await.unwrap()
    };

    let tasks = ctx.store().fetch_all(USER).await.unwrap();
    assert_eq!(tasks, vec![created]);
    assert_eq!(tasks[0].due_date, Some(due));
    assert!(!tasks[0].completed);
}

#[test_context(DbContext)]
#[tokio::test]
async fn fetch_is_scoped_to_the_user(ctx: &mut DbContext) {
    let store = ctx.store();
    store.create(USER, &new_task("Mine", 0)).await.unwrap();
    store.create("other", &new_task("Theirs", 0)).await.unwrap();

    let mine = store.fetch_all(USER).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Mine");
    assert_eq!(store.next_order_value(USER).await.unwrap(), 1);
}

#[test_context(DbContext)]
#[tokio::test]
async fn content_update_can_clear_the_due_date(ctx: &mut DbContext) {
    let store = ctx.store();
    let mut task = new_task("Dated", 0);
    task.due_date = Some(common::date(2024, 1, 1));
    let created = store.create(USER, &task).await.unwrap();

    let updated = store
        .update(&created.id, &TaskUpdate::content("Undated", "", None))
        .await
        .unwrap();

    assert_eq!(updated.title, "Undated");
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.created_at, created.created_at);
}

#[test_context(DbContext)]
#[tokio::test]
async fn missing_rows_are_not_found(ctx: &mut DbContext) {
    let store = ctx.store();

    let update = store.update("missing", &TaskUpdate::completion(true)).await;
    let remove = store.remove("missing").await;

    assert!(matches!(update, Err(StoreError::NotFound(_))));
    assert!(matches!(remove, Err(StoreError::NotFound(_))));
}

#[test_context(DbContext)]
#[tokio::test]
async fn bulk_order_writes_every_pair(ctx: &mut DbContext) {
    let store = ctx.store();
    let a = store.create(USER, &new_task("A", 0)).await.unwrap();
    let b = store.create(USER, &new_task("B", 1)).await.unwrap();

    store
        .bulk_set_order(&[
            TaskOrder { id: a.id.clone(), order: 1 },
            TaskOrder { id: b.id.clone(), order: 0 },
        ])
        .await
        .unwrap();

    let titles: Vec<String> = store.fetch_all(USER).await.unwrap().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, ["B", "A"]);
}

#[test_context(DbContext)]
#[tokio::test]
async fn manager_round_trip_through_sqlite(ctx: &mut DbContext) {
    let mut manager = TaskOrderManager::new(ctx.store(), USER);
    manager.load().await.unwrap();
    for title in ["A", "B", "C"] {
        manager.add_task(title, "", None).await.unwrap();
    }
    let last = manager.sorted_ids()[2].clone();
    manager.move_task(&last, 0).await.unwrap();
    manager.toggle_completion(&last).await.unwrap();

    let mut reloaded = TaskOrderManager::new(ctx.store(), USER);
    reloaded.load().await.unwrap();
    let titles: Vec<&str> = reloaded.sorted_tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["C", "A", "B"]);
    assert!(reloaded.get(&last).unwrap().completed);
    assert_eq!(reloaded.statistics().completed_tasks, 1);
}

#[test_context(DbContext)]
#[tokio::test]
async fn profile_onboarding_persists(ctx: &mut DbContext) {
    let profiles = ProfileService::new(ctx.store(), UserSession::new(USER));
    assert!(profiles.load().await.unwrap().is_none());

    profiles.complete_onboarding("Ada").await.unwrap();

    let fresh = ProfileService::new(ctx.store(), UserSession::new(USER));
    let profile = fresh.load().await.unwrap().unwrap();
    assert_eq!(profile.display_name, "Ada");
    assert_eq!(fresh.session().display_name().as_deref(), Some("Ada"));
}

#[test_context(DbContext)]
#[tokio::test]
async fn urgent_task_is_one_per_user(ctx: &mut DbContext) {
    let store = ctx.store();
    store.upsert_urgent_task(USER, "First").await.unwrap();
    store.upsert_urgent_task(USER, "Second").await.unwrap();
    store.upsert_urgent_task("other", "Theirs").await.unwrap();

    let current = store.get_urgent_task(USER).await.unwrap().unwrap();
    assert_eq!(current.title, "Second");

    let conn = Connection::open(&ctx.path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM urgent_tasks WHERE user_id = ?1", [USER], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test_context(DbContext)]
#[test]
fn database_is_created_at_the_latest_schema(ctx: &mut DbContext) {
    drop(ctx.store());

    let conn = Connection::open(&ctx.path).unwrap();
    assert_eq!(get_db_version(&conn).unwrap(), MigrationManager::new().latest_version());
}
