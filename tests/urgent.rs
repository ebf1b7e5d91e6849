use momentum::libs::error::TaskError;
use momentum::libs::mock::{MockStore, DEV_USER_ID};
use momentum::libs::urgent::UrgentTaskService;

#[tokio::test]
async fn seeded_store_has_an_urgent_task() {
    let urgent = UrgentTaskService::new(MockStore::seeded(DEV_USER_ID), DEV_USER_ID);
    let task = urgent.current().await.unwrap().unwrap();
    assert_eq!(task.title, "Important Dev Task");
}

#[tokio::test]
async fn set_replaces_and_clear_removes() {
    let urgent = UrgentTaskService::new(MockStore::new(), "user-1");
    assert!(urgent.current().await.unwrap().is_none());

    let first = urgent.set("  Call the bank ").await.unwrap();
    assert_eq!(first.title, "Call the bank");

    let second = urgent.set("Renew passport").await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(urgent.current().await.unwrap().unwrap().title, "Renew passport");

    urgent.clear().await.unwrap();
    assert!(urgent.current().await.unwrap().is_none());
}

#[tokio::test]
async fn blank_title_is_rejected() {
    let urgent = UrgentTaskService::new(MockStore::new(), "user-1");
    let err = urgent.set("\t ").await.unwrap_err();
    assert!(matches!(err, TaskError::Validation(_)));
    assert!(urgent.current().await.unwrap().is_none());
}

#[tokio::test]
async fn users_do_not_share_urgent_tasks() {
    let store = MockStore::new();
    let mine = UrgentTaskService::new(store.clone(), "user-1");
    let theirs = UrgentTaskService::new(store, "user-2");

    mine.set("Mine").await.unwrap();
    assert!(theirs.current().await.unwrap().is_none());
}
