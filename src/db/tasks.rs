//! SQLite-backed task store.
//!
//! [`LocalStore`] keeps everything in one database file and implements the
//! same traits as the hosted backend. Profile and urgent-task storage live
//! in [`super::users`] and [`super::urgent_tasks`].

use super::db::Db;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::store::TaskStore;
use crate::libs::task::{NewTask, Task, TaskOrder, TaskUpdate};
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::types::ToSql;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

const TASK_COLUMNS: &str = "id, user_id, title, description, due_date, completed, task_order, created_at, updated_at";
const INSERT_TASK: &str = "INSERT INTO tasks (id, user_id, title, description, due_date, completed, task_order, created_at, updated_at)
    VALUES (?1, ?2, ?3, ?4, ?5, FALSE, ?6, ?7, ?7)";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const UPDATE_ORDER: &str = "UPDATE tasks SET task_order = ?2 WHERE id = ?1";
const COUNT_TASKS: &str = "SELECT COUNT(*) FROM tasks WHERE user_id = ?1";

#[derive(Clone)]
pub struct LocalStore {
    pub(super) conn: Arc<Mutex<Connection>>,
}

impl LocalStore {
    /// Opens (and migrates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::from_db(Db::open(path)?))
    }

    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::from_db(Db::in_memory()?))
    }

    pub fn from_db(db: Db) -> Self {
        Self {
            conn: Arc::new(Mutex::new(db.conn)),
        }
    }

    fn select_task(conn: &Connection, task_id: &str) -> StoreResult<Task> {
        conn.query_row(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"), params![task_id], task_from_row)
            .optional()?
            .ok_or_else(|| StoreError::NotFound(format!("task {task_id}")))
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        due_date: row.get(4)?,
        completed: row.get(5)?,
        order: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl TaskStore for LocalStore {
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY task_order ASC"
        ))?;
        let task_iter = stmt.query_map(params![user_id], task_from_row)?;

        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        let conn = self.conn.lock();
        let id = Uuid::now_v7().to_string();
        conn.execute(
            INSERT_TASK,
            params![id, user_id, task.title, task.description, task.due_date, task.order, Utc::now()],
        )?;
        Self::select_task(&conn, &id)
    }

    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        let conn = self.conn.lock();

        let mut assignments: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();
        if let Some(title) = &update.title {
            assignments.push("title");
            values.push(Box::new(title.clone()));
        }
        if let Some(description) = &update.description {
            assignments.push("description");
            values.push(Box::new(description.clone()));
        }
        if let Some(due_date) = update.due_date {
            assignments.push("due_date");
            values.push(Box::new(due_date));
        }
        if let Some(completed) = update.completed {
            assignments.push("completed");
            values.push(Box::new(completed));
        }
        assignments.push("updated_at");
        values.push(Box::new(Utc::now()));
        values.push(Box::new(task_id.to_string()));

        let set_clause = assignments
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE tasks SET {set_clause} WHERE id = ?{}", values.len());

        let changed = conn.execute(&sql, rusqlite::params_from_iter(values.iter()))?;
        if changed == 0 {
            return Err(StoreError::NotFound(format!("task {task_id}")));
        }
        Self::select_task(&conn, task_id)
    }

    async fn remove(&self, task_id: &str) -> StoreResult<()> {
        let conn = self.conn.lock();
        match conn.execute(DELETE_TASK, params![task_id])? {
            0 => Err(StoreError::NotFound(format!("task {task_id}"))),
            _ => Ok(()),
        }
    }

    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        for pair in orders {
            if tx.execute(UPDATE_ORDER, params![pair.id, pair.order])? == 0 {
                // Dropping the transaction rolls back the pairs already written.
                return Err(StoreError::NotFound(format!("task {}", pair.id)));
            }
        }
        tx.commit()?;
        Ok(())
    }

    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64> {
        let conn = self.conn.lock();
        Ok(conn.query_row(COUNT_TASKS, params![user_id], |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::manager::TaskOrderManager;
    use chrono::Duration;

    fn new_task(title: &str, order: i64) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            order,
        }
    }

    #[tokio::test]
    async fn update_with_only_completion_keeps_content() {
        let store = LocalStore::in_memory().unwrap();
        let created = store.create("u1", &new_task("Read", 0)).await.unwrap();

        let updated = store.update(&created.id, &TaskUpdate::completion(true)).await.unwrap();
        assert!(updated.completed);
        assert_eq!(updated.title, "Read");
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn failed_bulk_order_rolls_back() {
        let store = LocalStore::in_memory().unwrap();
        let a = store.create("u1", &new_task("A", 0)).await.unwrap();

        let orders = vec![
            TaskOrder { id: a.id.clone(), order: 5 },
            TaskOrder { id: "missing".to_string(), order: 6 },
        ];
        assert!(matches!(store.bulk_set_order(&orders).await, Err(StoreError::NotFound(_))));

        let tasks = store.fetch_all("u1").await.unwrap();
        assert_eq!(tasks[0].order, 0);
    }

    #[tokio::test]
    async fn reorder_does_not_count_old_completions_as_today() {
        let store = LocalStore::in_memory().unwrap();
        let a = store.create("u1", &new_task("A", 0)).await.unwrap();
        let b = store.create("u1", &new_task("B", 1)).await.unwrap();
        store.update(&a.id, &TaskUpdate::completion(true)).await.unwrap();
        let two_days_ago = Utc::now() - Duration::days(2);
        store
            .conn
            .lock()
            .execute(
                "UPDATE tasks SET created_at = ?1, updated_at = ?1 WHERE id = ?2",
                params![two_days_ago, a.id],
            )
            .unwrap();

        let mut manager = TaskOrderManager::new(store.clone(), "u1");
        manager.load().await.unwrap();
        assert_eq!(manager.statistics().tasks_completed_today, 0);
        manager.reorder(&[b.id.clone(), a.id.clone()]).await.unwrap();
        assert_eq!(manager.statistics().tasks_completed_today, 0);

        let mut reloaded = TaskOrderManager::new(store.clone(), "u1");
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.sorted_ids(), vec![b.id.clone(), a.id.clone()]);
        assert_eq!(reloaded.statistics().tasks_completed_today, 0);
        assert_eq!(reloaded.statistics().completed_tasks, 1);
        assert_eq!(reloaded.get(&a.id).unwrap().updated_at.timestamp(), two_days_ago.timestamp());
    }
}
