//! Persistence interfaces consumed by the manager and the services.
//!
//! Every provider ([`crate::api::supabase::SupabaseStore`],
//! [`crate::db::tasks::LocalStore`], [`crate::libs::mock::MockStore`])
//! implements all three traits. The provider is picked once at startup by
//! [`crate::libs::backend::Backend`]; nothing above this layer knows which
//! one is in use.

use super::error::StoreResult;
use super::profile::UserProfile;
use super::task::{NewTask, Task, TaskOrder, TaskUpdate};
use super::urgent::UrgentTask;

/// Row storage for tasks.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    /// Returns every task owned by `user_id`. Order is not guaranteed.
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>>;

    /// Inserts a task and returns the canonical record with its assigned id.
    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task>;

    /// Applies a partial update and returns the canonical record.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`](super::error::StoreError::NotFound) when no
    /// task has `task_id`.
    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`](super::error::StoreError::NotFound) when no
    /// task has `task_id`.
    async fn remove(&self, task_id: &str) -> StoreResult<()>;

    /// Writes the `order` of every listed task. Either all pairs are written
    /// or the call reports failure.
    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()>;

    /// Number of tasks owned by `user_id`; the order value for an appended task.
    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64>;
}

/// Storage for the per-user profile row.
#[allow(async_fn_in_trait)]
pub trait ProfileStore {
    /// # Errors
    ///
    /// [`StoreError::NotFound`](super::error::StoreError::NotFound) when the
    /// user has not created a profile yet.
    async fn get_profile(&self, user_id: &str) -> StoreResult<UserProfile>;

    /// Creates the profile or replaces its display name.
    async fn upsert_profile(&self, user_id: &str, display_name: &str) -> StoreResult<UserProfile>;

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()>;
}

/// Storage for the single urgent task a user may pin.
#[allow(async_fn_in_trait)]
pub trait UrgentTaskStore {
    /// Latest urgent task of the user, if any.
    async fn get_urgent_task(&self, user_id: &str) -> StoreResult<Option<UrgentTask>>;

    /// Inserts or replaces the user's urgent task.
    async fn upsert_urgent_task(&self, user_id: &str, title: &str) -> StoreResult<UrgentTask>;

    async fn delete_urgent_task(&self, user_id: &str) -> StoreResult<()>;
}
