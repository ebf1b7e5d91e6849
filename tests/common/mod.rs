#![allow(dead_code)]

use chrono::NaiveDate;
use momentum::libs::error::{StoreError, StoreResult};
use momentum::libs::feedback::{Feedback, FeedbackSink};
use momentum::libs::mock::MockStore;
use momentum::libs::store::TaskStore;
use momentum::libs::task::{NewTask, Task, TaskOrder, TaskUpdate};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const USER: &str = "user-1";

/// A [`MockStore`] whose calls can be made to fail, counting every call.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: MockStore,
    state: Arc<Flags>,
}

#[derive(Default)]
struct Flags {
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_remove: AtomicBool,
    fail_bulk: AtomicBool,
    calls: AtomicUsize,
    bulk_batches: Mutex<Vec<Vec<TaskOrder>>>,
}

fn offline() -> StoreError {
    StoreError::Rejected {
        status: 503,
        message: "store offline".to_string(),
    }
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create(&self, fail: bool) {
        self.state.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_update(&self, fail: bool) {
        self.state.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_remove(&self, fail: bool) {
        self.state.fail_remove.store(fail, Ordering::SeqCst);
    }

    pub fn fail_bulk(&self, fail: bool) {
        self.state.fail_bulk.store(fail, Ordering::SeqCst);
    }

    /// Store calls made so far, failed ones included.
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    /// Every pair list passed to `bulk_set_order`.
    pub fn bulk_batches(&self) -> Vec<Vec<TaskOrder>> {
        self.state.bulk_batches.lock().clone()
    }

    fn count(&self) {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TaskStore for FlakyStore {
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        self.count();
        self.inner.fetch_all(user_id).await
    }

    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        self.count();
        if self.state.fail_create.load(Ordering::SeqCst) {
            return Err(offline());
        }
        self.inner.create(user_id, task).await
    }

    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        self.count();
        if self.state.fail_update.load(Ordering::SeqCst) {
            return Err(offline());
        }
        self.inner.update(task_id, update).await
    }

    async fn remove(&self, task_id: &str) -> StoreResult<()> {
        self.count();
        if self.state.fail_remove.load(Ordering::SeqCst) {
            return Err(offline());
        }
        self.inner.remove(task_id).await
    }

    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()> {
        self.count();
        self.state.bulk_batches.lock().push(orders.to_vec());
        if self.state.fail_bulk.load(Ordering::SeqCst) {
            return Err(offline());
        }
        self.inner.bulk_set_order(orders).await
    }

    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64> {
        self.count();
        self.inner.next_order_value(user_id).await
    }
}

/// Feedback sink remembering every signal.
#[derive(Default)]
pub struct RecordingFeedback {
    signals: Mutex<Vec<(Feedback, String)>>,
}

impl RecordingFeedback {
    pub fn signals(&self) -> Vec<(Feedback, String)> {
        self.signals.lock().clone()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&self, feedback: Feedback, title: &str) {
        self.signals.lock().push((feedback, title.to_string()));
    }
}

pub fn new_task(title: &str, order: i64) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        due_date: None,
        order,
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
