//! In-memory development store.
//!
//! Stands in for the hosted backend when `backend = "mock"`: nothing is
//! persisted beyond the process. [`MockStore::seeded`] starts with the sample
//! data a fresh development build shows.

use super::error::{StoreError, StoreResult};
use super::profile::UserProfile;
use super::store::{ProfileStore, TaskStore, UrgentTaskStore};
use super::task::{NewTask, Task, TaskOrder, TaskUpdate};
use super::urgent::UrgentTask;
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

/// User id of the development account.
pub const DEV_USER_ID: &str = "dev-user-123";
/// Display name of the development account.
pub const DEV_DISPLAY_NAME: &str = "Developer User";

#[derive(Debug, Default)]
struct MockState {
    tasks: Vec<Task>,
    counter: u64,
    profiles: Vec<UserProfile>,
    urgent: Vec<UrgentTask>,
}

impl MockState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.counter += 1;
        format!("{prefix}-{}", self.counter)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockState>>,
}

impl MockStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding one open and one completed sample task, a profile and
    /// an urgent task for `user_id`.
    pub fn seeded(user_id: &str) -> Self {
        let now = Utc::now();
        let today = now.date_naive();
        let store = Self::new();
        {
            let mut state = store.state.lock();
            state.tasks = vec![
                Task {
                    id: "task-1".to_string(),
                    user_id: user_id.to_string(),
                    title: "Sample Task 1".to_string(),
                    description: "This is a sample task for development".to_string(),
                    due_date: Some(today),
                    completed: false,
                    order: 0,
                    created_at: now,
                    updated_at: now,
                },
                Task {
                    id: "task-2".to_string(),
                    user_id: user_id.to_string(),
                    title: "Completed Task".to_string(),
                    description: "This task is already completed".to_string(),
                    due_date: Some(today),
                    completed: true,
                    order: 1,
                    created_at: now,
                    updated_at: now,
                },
            ];
            state.counter = 2;
            state.profiles.push(UserProfile {
                id: user_id.to_string(),
                display_name: DEV_DISPLAY_NAME.to_string(),
                created_at: now,
                updated_at: now,
            });
            state.urgent.push(UrgentTask {
                id: "urgent-1".to_string(),
                user_id: user_id.to_string(),
                title: "Important Dev Task".to_string(),
                created_at: now,
                updated_at: now,
            });
        }
        store
    }

    /// Stored copy of a task, bypassing any manager.
    pub fn task(&self, id: &str) -> Option<Task> {
        self.state.lock().tasks.iter().find(|task| task.id == id).cloned()
    }
}

impl TaskStore for MockStore {
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        let state = self.state.lock();
        Ok(state.tasks.iter().filter(|task| task.user_id == user_id).cloned().collect())
    }

    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        let mut state = self.state.lock();
        let now = Utc::now();
        let created = Task {
            id: state.next_id("task"),
            user_id: user_id.to_string(),
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            completed: false,
            order: task.order,
            created_at: now,
            updated_at: now,
        };
        state.tasks.push(created.clone());
        tracing::debug!(id = %created.id, "mock task created");
        Ok(created)
    }

    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        let mut state = self.state.lock();
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == task_id)
            .ok_or_else(|| StoreError::NotFound(format!("task {task_id}")))?;
        update.apply_to(task);
        task.updated_at = Utc::now();
        Ok(task.clone())
    }

    async fn remove(&self, task_id: &str) -> StoreResult<()> {
        let mut state = self.state.lock();
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != task_id);
        if state.tasks.len() == before {
            return Err(StoreError::NotFound(format!("task {task_id}")));
        }
        Ok(())
    }

    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()> {
        let mut state = self.state.lock();
        if let Some(missing) = orders.iter().find(|pair| !state.tasks.iter().any(|task| task.id == pair.id)) {
            return Err(StoreError::NotFound(format!("task {}", missing.id)));
        }
        for pair in orders {
            if let Some(task) = state.tasks.iter_mut().find(|task| task.id == pair.id) {
                task.order = pair.order;
            }
        }
        Ok(())
    }

    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64> {
        let state = self.state.lock();
        Ok(state.tasks.iter().filter(|task| task.user_id == user_id).count() as i64)
    }
}

impl ProfileStore for MockStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        self.state
            .lock()
            .profiles
            .iter()
            .find(|profile| profile.id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))
    }

    async fn upsert_profile(&self, user_id: &str, display_name: &str) -> StoreResult<UserProfile> {
        let mut state = self.state.lock();
        let now = Utc::now();
        if let Some(profile) = state.profiles.iter_mut().find(|profile| profile.id == user_id) {
            profile.display_name = display_name.to_string();
            profile.updated_at = now;
            return Ok(profile.clone());
        }
        let profile = UserProfile {
            id: user_id.to_string(),
            display_name: display_name.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.profiles.push(profile.clone());
        Ok(profile)
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        let mut state = self.state.lock();
        let profile = state
            .profiles
            .iter_mut()
            .find(|profile| profile.id == user_id)
            .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))?;
        profile.display_name = display_name.to_string();
        profile.updated_at = Utc::now();
        Ok(())
    }
}

impl UrgentTaskStore for MockStore {
    async fn get_urgent_task(&self, user_id: &str) -> StoreResult<Option<UrgentTask>> {
        Ok(self.state.lock().urgent.iter().find(|task| task.user_id == user_id).cloned())
    }

    async fn upsert_urgent_task(&self, user_id: &str, title: &str) -> StoreResult<UrgentTask> {
        let mut state = self.state.lock();
        let now = Utc::now();
        if let Some(task) = state.urgent.iter_mut().find(|task| task.user_id == user_id) {
            task.title = title.to_string();
            task.updated_at = now;
            return Ok(task.clone());
        }
        let task = UrgentTask {
            id: state.next_id("urgent"),
            user_id: user_id.to_string(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        };
        state.urgent.push(task.clone());
        Ok(task)
    }

    async fn delete_urgent_task(&self, user_id: &str) -> StoreResult<()> {
        self.state.lock().urgent.retain(|task| task.user_id != user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeded_store_matches_development_data() {
        let store = MockStore::seeded(DEV_USER_ID);
        let tasks = store.fetch_all(DEV_USER_ID).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks.iter().filter(|t| t.completed).count(), 1);
        assert_eq!(store.get_profile(DEV_USER_ID).await.unwrap().display_name, DEV_DISPLAY_NAME);
        assert!(store.get_urgent_task(DEV_USER_ID).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn created_ids_do_not_collide_with_seed() {
        let store = MockStore::seeded(DEV_USER_ID);
        let new_task = NewTask {
            title: "Third".to_string(),
            description: String::new(),
            due_date: None,
            order: 2,
        };
        let created = store.create(DEV_USER_ID, &new_task).await.unwrap();
        assert_eq!(created.id, "task-3");
        assert_eq!(store.next_order_value(DEV_USER_ID).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn bulk_order_is_all_or_nothing() {
        let store = MockStore::seeded(DEV_USER_ID);
        let orders = vec![
            TaskOrder { id: "task-1".to_string(), order: 1 },
            TaskOrder { id: "missing".to_string(), order: 0 },
        ];
        let err = store.bulk_set_order(&orders).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert_eq!(store.task("task-1").unwrap().order, 0);
    }

    #[tokio::test]
    async fn bulk_order_leaves_timestamps_alone() {
        let store = MockStore::seeded(DEV_USER_ID);
        let before = store.task("task-1").unwrap();
        let orders = vec![
            TaskOrder { id: "task-1".to_string(), order: 1 },
            TaskOrder { id: "task-2".to_string(), order: 0 },
        ];
        store.bulk_set_order(&orders).await.unwrap();

        let after = store.task("task-1").unwrap();
        assert_eq!(after.order, 1);
        assert_eq!(after.updated_at, before.updated_at);
    }
}
