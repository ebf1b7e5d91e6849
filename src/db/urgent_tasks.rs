use super::tasks::LocalStore;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::store::UrgentTaskStore;
use crate::libs::urgent::UrgentTask;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

const SELECT_URGENT: &str = "SELECT id, user_id, title, created_at, updated_at FROM urgent_tasks
    WHERE user_id = ?1 ORDER BY created_at DESC LIMIT 1";
const UPSERT_URGENT: &str = "INSERT INTO urgent_tasks (id, user_id, title, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)
    ON CONFLICT(user_id) DO UPDATE SET title = excluded.title, updated_at = excluded.updated_at";
const DELETE_URGENT: &str = "DELETE FROM urgent_tasks WHERE user_id = ?1";

fn select_urgent(conn: &Connection, user_id: &str) -> StoreResult<Option<UrgentTask>> {
    Ok(conn
        .query_row(SELECT_URGENT, params![user_id], |row| {
            Ok(UrgentTask {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                created_at: row.get(3)?,
                updated_at: row.get(4)?,
            })
        })
        .optional()?)
}

impl UrgentTaskStore for LocalStore {
    async fn get_urgent_task(&self, user_id: &str) -> StoreResult<Option<UrgentTask>> {
        select_urgent(&self.conn.lock(), user_id)
    }

    async fn upsert_urgent_task(&self, user_id: &str, title: &str) -> StoreResult<UrgentTask> {
        let conn = self.conn.lock();
        let id = Uuid::now_v7().to_string();
        conn.execute(UPSERT_URGENT, params![id, user_id, title, Utc::now()])?;
        select_urgent(&conn, user_id)?.ok_or_else(|| StoreError::Empty(format!("urgent task of {user_id}")))
    }

    async fn delete_urgent_task(&self, user_id: &str) -> StoreResult<()> {
        self.conn.lock().execute(DELETE_URGENT, params![user_id])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_upsert_replaces_the_title() {
        let store = LocalStore::in_memory().unwrap();
        let first = store.upsert_urgent_task("u1", "Call the bank").await.unwrap();
        let second = store.upsert_urgent_task("u1", "Renew passport").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.title, "Renew passport");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = LocalStore::in_memory().unwrap();
        store.upsert_urgent_task("u1", "Call").await.unwrap();
        store.delete_urgent_task("u1").await.unwrap();
        store.delete_urgent_task("u1").await.unwrap();
        assert!(store.get_urgent_task("u1").await.unwrap().is_none());
    }
}
