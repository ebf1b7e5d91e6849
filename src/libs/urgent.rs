//! The single "urgent" task a user can pin above the list.

use super::error::{Result, TaskError};
use super::store::UrgentTaskStore;
use super::task::normalize_title;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgentTask {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct UrgentTaskService<S> {
    store: S,
    user_id: String,
}

impl<S: UrgentTaskStore> UrgentTaskService<S> {
    pub fn new(store: S, user_id: &str) -> Self {
        Self {
            store,
            user_id: user_id.to_string(),
        }
    }

    pub async fn current(&self) -> Result<Option<UrgentTask>> {
        Ok(self.store.get_urgent_task(&self.user_id).await?)
    }

    /// Pins `title`, replacing any previous urgent task.
    pub async fn set(&self, title: &str) -> Result<UrgentTask> {
        let title = normalize_title(title)
            .ok_or_else(|| TaskError::Validation("urgent task title must not be empty".to_string()))?;
        let task = self.store.upsert_urgent_task(&self.user_id, title).await.map_err(|err| {
            tracing::warn!(user_id = %self.user_id, error = %err, "urgent task upsert failed");
            TaskError::from(err)
        })?;
        tracing::debug!(user_id = %self.user_id, id = %task.id, "urgent task set");
        Ok(task)
    }

    pub async fn clear(&self) -> Result<()> {
        self.store.delete_urgent_task(&self.user_id).await.map_err(|err| {
            tracing::warn!(user_id = %self.user_id, error = %err, "urgent task delete failed");
            TaskError::from(err)
        })
    }
}
