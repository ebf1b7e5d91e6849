//! The task order manager.
//!
//! Holds one user's tasks for a session, applies mutations and keeps the
//! `order` field in sync with a [`TaskStore`].
//!
//! ## Confirmed and optimistic mutations
//!
//! Add, edit, toggle and delete touch the local collection only after the
//! store answered, so a failure leaves it exactly as it was. Reorder is the
//! exception: the new positions are applied first and stay applied when the
//! bulk write fails, leaving local and remote order apart until the next
//! [`TaskOrderManager::load`].
//!
//! ## Concurrency
//!
//! Every mutation takes `&mut self` and awaits exactly one store call, so
//! operations on one manager never overlap. Two managers (or two processes)
//! writing the same task race at the store and the last write wins.

use super::error::{Result, StoreError, TaskError};
use super::feedback::{Feedback, FeedbackSink, TracingFeedback};
use super::mutation::{Applied, Mutation, MutationKind};
use super::stats::TaskStatistics;
use super::store::TaskStore;
use super::task::{normalize_title, NewTask, Task, TaskOrder, TaskUpdate};
use chrono::{NaiveDate, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub struct TaskOrderManager<S> {
    store: S,
    user_id: String,
    tasks: HashMap<String, Task>,
    /// Ids sorted by `order`; rebuilt after every change to `tasks`.
    sorted: Vec<String>,
    loaded: bool,
    feedback: Arc<dyn FeedbackSink>,
}

impl<S: TaskStore> TaskOrderManager<S> {
    /// Creates an empty manager. Call [`load`](Self::load) to pull the
    /// user's list; an unloaded manager can still add tasks.
    pub fn new(store: S, user_id: &str) -> Self {
        Self {
            store,
            user_id: user_id.to_string(),
            tasks: HashMap::new(),
            sorted: Vec::new(),
            loaded: false,
            feedback: Arc::new(TracingFeedback),
        }
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackSink>) -> Self {
        self.feedback = feedback;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Tasks in display order.
    pub fn sorted_tasks(&self) -> Vec<&Task> {
        self.sorted.iter().filter_map(|id| self.tasks.get(id)).collect()
    }

    pub fn sorted_ids(&self) -> Vec<String> {
        self.sorted.clone()
    }

    /// Replaces the local collection with the store's. Returns the task count.
    pub async fn load(&mut self) -> Result<usize> {
        let tasks = self.store.fetch_all(&self.user_id).await.map_err(|err| {
            tracing::warn!(user_id = %self.user_id, error = %err, "fetching tasks failed");
            TaskError::from(err)
        })?;

        self.tasks = tasks.into_iter().map(|task| (task.id.clone(), task)).collect();
        self.loaded = true;
        self.rebuild_view();
        tracing::debug!(user_id = %self.user_id, count = self.tasks.len(), "tasks loaded");
        Ok(self.tasks.len())
    }

    /// Dispatches a tagged mutation to the matching operation.
    pub async fn apply(&mut self, mutation: Mutation) -> Result<Applied> {
        match mutation {
            Mutation::Add {
                title,
                description,
                due_date,
            } => self.add_task(&title, &description, due_date).await.map(Applied::Task),
            Mutation::Edit {
                id,
                title,
                description,
                due_date,
            } => self.edit_task(&id, &title, &description, due_date).await.map(Applied::Task),
            Mutation::Toggle { id } => self.toggle_completion(&id).await.map(Applied::Task),
            Mutation::Delete { id } => {
                self.delete_task(&id).await?;
                Ok(Applied::Removed(id))
            }
            Mutation::Reorder { sequence } => self.reorder(&sequence).await.map(Applied::Reordered),
        }
    }

    /// Creates a task at the end of the list.
    pub async fn add_task(&mut self, title: &str, description: &str, due_date: Option<NaiveDate>) -> Result<Task> {
        let kind = MutationKind::Add;
        let title = require_title(title)?;

        let order = if self.loaded {
            self.tasks.len() as i64
        } else {
            self.store
                .next_order_value(&self.user_id)
                .await
                .map_err(|err| self.failed(kind, None, err))?
        };

        let new_task = NewTask {
            title: title.to_string(),
            description: description.to_string(),
            due_date,
            order,
        };
        let created = self
            .store
            .create(&self.user_id, &new_task)
            .await
            .map_err(|err| self.failed(kind, None, err))?;

        tracing::debug!(id = %created.id, order = created.order, "task created");
        self.tasks.insert(created.id.clone(), created.clone());
        self.rebuild_view();
        Ok(created)
    }

    /// Replaces title, description and due date of an existing task.
    pub async fn edit_task(&mut self, id: &str, title: &str, description: &str, due_date: Option<NaiveDate>) -> Result<Task> {
        let kind = MutationKind::Edit;
        self.require_task(id)?;
        let title = require_title(title)?;

        let update = TaskUpdate::content(title, description, due_date);
        let updated = self
            .store
            .update(id, &update)
            .await
            .map_err(|err| self.failed(kind, Some(id), err))?;

        self.replace(updated.clone());
        Ok(updated)
    }

    /// Flips the completion flag and emits the matching feedback signal.
    pub async fn toggle_completion(&mut self, id: &str) -> Result<Task> {
        let kind = MutationKind::Toggle;
        let target = !self.require_task(id)?.completed;

        let updated = self
            .store
            .update(id, &TaskUpdate::completion(target))
            .await
            .map_err(|err| self.failed(kind, Some(id), err))?;

        self.feedback.notify(Feedback::for_completion(updated.completed), &updated.title);
        self.replace(updated.clone());
        Ok(updated)
    }

    pub async fn delete_task(&mut self, id: &str) -> Result<()> {
        let kind = MutationKind::Delete;
        self.require_task(id)?;

        self.store.remove(id).await.map_err(|err| self.failed(kind, Some(id), err))?;

        self.tasks.remove(id);
        self.rebuild_view();
        tracing::debug!(id, "task deleted");
        Ok(())
    }

    /// Assigns `order = index` to every id of `sequence`.
    ///
    /// `sequence` must be a permutation of the current ids. Only tasks whose
    /// order actually changes are sent to the store; the count of those is
    /// returned.
    pub async fn reorder(&mut self, sequence: &[String]) -> Result<usize> {
        let kind = MutationKind::Reorder;
        self.require_permutation(sequence)?;

        let changes: Vec<TaskOrder> = sequence
            .iter()
            .enumerate()
            .map(|(index, id)| TaskOrder {
                id: id.clone(),
                order: index as i64,
            })
            .filter(|pair| self.tasks.get(&pair.id).is_some_and(|task| task.order != pair.order))
            .collect();

        if changes.is_empty() {
            return Ok(0);
        }

        self.apply_orders(&changes);

        match self.store.bulk_set_order(&changes).await {
            Ok(()) => {
                tracing::debug!(changed = changes.len(), "tasks reordered");
                Ok(changes.len())
            }
            Err(err) => {
                tracing::warn!(
                    changed = changes.len(),
                    "reorder kept locally after store failure; local and remote order differ until the next load"
                );
                Err(self.failed(kind, None, err))
            }
        }
    }

    /// Moves one task to `position` (0-based, clamped to the end) and
    /// renumbers the whole list, the way a drag-and-drop gesture ends.
    pub async fn move_task(&mut self, id: &str, position: usize) -> Result<usize> {
        self.require_task(id)?;
        let mut sequence: Vec<String> = self.sorted.iter().filter(|other| *other != id).cloned().collect();
        let position = position.min(sequence.len());
        sequence.insert(position, id.to_string());
        self.reorder(&sequence).await
    }

    /// Statistics for the current UTC day.
    pub fn statistics(&self) -> TaskStatistics {
        self.statistics_on(Utc::now().date_naive())
    }

    pub fn statistics_on(&self, date: NaiveDate) -> TaskStatistics {
        TaskStatistics::collect(self.tasks.values(), date)
    }

    fn require_task(&self, id: &str) -> Result<&Task> {
        self.tasks.get(id).ok_or_else(|| TaskError::NotFound(format!("task {id}")))
    }

    fn require_permutation(&self, sequence: &[String]) -> Result<()> {
        if sequence.len() != self.tasks.len() {
            return Err(TaskError::Validation(format!(
                "reorder expects {} ids, got {}",
                self.tasks.len(),
                sequence.len()
            )));
        }

        let mut seen = HashSet::with_capacity(sequence.len());
        for id in sequence {
            if !self.tasks.contains_key(id) {
                return Err(TaskError::Validation(format!("unknown task id in reorder: {id}")));
            }
            if !seen.insert(id.as_str()) {
                return Err(TaskError::Validation(format!("duplicate task id in reorder: {id}")));
            }
        }
        Ok(())
    }

    fn apply_orders(&mut self, orders: &[TaskOrder]) {
        for pair in orders {
            if let Some(task) = self.tasks.get_mut(&pair.id) {
                task.order = pair.order;
            }
        }
        self.rebuild_view();
    }

    fn replace(&mut self, task: Task) {
        self.tasks.insert(task.id.clone(), task);
        self.rebuild_view();
    }

    fn rebuild_view(&mut self) {
        let mut tasks: Vec<&Task> = self.tasks.values().collect();
        tasks.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        self.sorted = tasks.into_iter().map(|task| task.id.clone()).collect();
    }

    fn failed(&self, kind: MutationKind, id: Option<&str>, err: StoreError) -> TaskError {
        tracing::warn!(
            mutation = kind.as_str(),
            optimistic = kind.is_optimistic(),
            user_id = %self.user_id,
            id = id.unwrap_or("-"),
            error = %err,
            "store call failed"
        );
        err.into()
    }
}

fn require_title(title: &str) -> Result<&str> {
    normalize_title(title).ok_or_else(|| TaskError::Validation("task title must not be empty".to_string()))
}
