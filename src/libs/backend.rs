//! Startup selection of the store provider.
//!
//! The store traits use `async fn` and so cannot be trait objects; a closed
//! enum carries the chosen provider instead and forwards each call. Code
//! above this layer is generic over the traits and never matches on the
//! variant.

use super::config::{BackendKind, Config};
use super::error::StoreResult;
use super::mock::MockStore;
use super::profile::UserProfile;
use super::store::{ProfileStore, TaskStore, UrgentTaskStore};
use super::task::{NewTask, Task, TaskOrder, TaskUpdate};
use super::urgent::UrgentTask;
use crate::api::supabase::SupabaseStore;
use crate::db::db::Db;
use crate::db::tasks::LocalStore;
use anyhow::Result;

#[derive(Clone)]
pub enum Backend {
    Remote(SupabaseStore),
    Local(LocalStore),
    Mock(MockStore),
}

macro_rules! delegate {
    ($self:ident, $store:ident => $call:expr) => {
        match $self {
            Backend::Remote($store) => $call,
            Backend::Local($store) => $call,
            Backend::Mock($store) => $call,
        }
    };
}

impl Backend {
    /// Builds the provider named by `config.backend`.
    ///
    /// # Errors
    ///
    /// Fails when the remote backend is selected without complete Supabase
    /// settings, or when the local database cannot be opened.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = match config.backend {
            BackendKind::Remote => Backend::Remote(SupabaseStore::new(config.remote()?)),
            BackendKind::Local => {
                let store = match config.local.as_ref().and_then(|local| local.db_file.as_ref()) {
                    Some(path) => LocalStore::open(path)?,
                    None => LocalStore::from_db(Db::new()?),
                };
                Backend::Local(store)
            }
            BackendKind::Mock => {
                let user_id = config.user_id().unwrap_or_else(|| super::mock::DEV_USER_ID.to_string());
                Backend::Mock(MockStore::seeded(&user_id))
            }
        };
        tracing::debug!(backend = %config.backend, "store provider selected");
        Ok(backend)
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Remote(_) => BackendKind::Remote,
            Backend::Local(_) => BackendKind::Local,
            Backend::Mock(_) => BackendKind::Mock,
        }
    }
}

impl TaskStore for Backend {
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        delegate!(self, store => store.fetch_all(user_id).await)
    }

    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        delegate!(self, store => store.create(user_id, task).await)
    }

    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        delegate!(self, store => store.update(task_id, update).await)
    }

    async fn remove(&self, task_id: &str) -> StoreResult<()> {
        delegate!(self, store => store.remove(task_id).await)
    }

    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()> {
        delegate!(self, store => store.bulk_set_order(orders).await)
    }

    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64> {
        delegate!(self, store => store.next_order_value(user_id).await)
    }
}

impl ProfileStore for Backend {
    async fn get_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        delegate!(self, store => store.get_profile(user_id).await)
    }

    async fn upsert_profile(&self, user_id: &str, display_name: &str) -> StoreResult<UserProfile> {
        delegate!(self, store => store.upsert_profile(user_id, display_name).await)
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        delegate!(self, store => store.update_display_name(user_id, display_name).await)
    }
}

impl UrgentTaskStore for Backend {
    async fn get_urgent_task(&self, user_id: &str) -> StoreResult<Option<UrgentTask>> {
        delegate!(self, store => store.get_urgent_task(user_id).await)
    }

    async fn upsert_urgent_task(&self, user_id: &str, title: &str) -> StoreResult<UrgentTask> {
        delegate!(self, store => store.upsert_urgent_task(user_id, title).await)
    }

    async fn delete_urgent_task(&self, user_id: &str) -> StoreResult<()> {
        delegate!(self, store => store.delete_urgent_task(user_id).await)
    }
}
