//! Task records and the payloads exchanged with the stores.
//!
//! Field names follow the persisted row shape: the in-memory `order` field is
//! stored as `task_order`, everything else maps one to one.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One user-visible unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned by the store; never changes.
    pub id: String,
    /// Owner of the task.
    pub user_id: String,
    /// Non-empty title.
    pub title: String,
    /// Free text; a `null` coming from the store reads as empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Position within the owner's list.
    #[serde(rename = "task_order")]
    pub order: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    #[serde(rename = "task_order")]
    pub order: i64,
}

/// Partial update; only `Some` fields are sent.
///
/// `due_date` is doubly optional: `Some(None)` clears the date, `None` leaves
/// it untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TaskUpdate {
    /// Update that replaces the editable content fields.
    pub fn content(title: &str, description: &str, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            due_date: Some(due_date),
            ..Self::default()
        }
    }

    /// Update that only sets the completion flag.
    pub fn completion(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Applies the set fields to `task`. Used by stores that keep records in
    /// memory or read-modify-write them.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// One `{id, order}` pair of a bulk reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOrder {
    pub id: String,
    #[serde(rename = "task_order")]
    pub order: i64,
}

/// Returns `Some(trimmed)` when the title has content after trimming.
pub fn normalize_title(title: &str) -> Option<&str> {
    let trimmed = title.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_remote_row() {
        let row = r#"{
            "id": "8d7f4a2e-1c3b-4c55-9a0e-2f3b6a1d9c10",
            "user_id": "user-1",
            "title": "Water plants",
            "description": null,
            "due_date": "2024-05-02",
            "completed": false,
            "task_order": 3,
            "created_at": "2024-05-01T08:15:00.123456+00:00",
            "updated_at": "2024-05-01T08:15:00.123456+00:00"
        }"#;

        let task: Task = serde_json::from_str(row).unwrap();
        assert_eq!(task.title, "Water plants");
        assert_eq!(task.description, "");
        assert_eq!(task.order, 3);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 5, 2));
    }

    #[test]
    fn update_skips_unset_fields() {
        let json = serde_json::to_value(TaskUpdate::completion(true)).unwrap();
        assert_eq!(json, serde_json::json!({ "completed": true }));
    }

    #[test]
    fn content_update_clears_due_date_explicitly() {
        let json = serde_json::to_value(TaskUpdate::content("A", "", None)).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "A", "description": "", "due_date": null }));
    }

    #[test]
    fn titles_are_trimmed() {
        assert_eq!(normalize_title("  Buy milk \n"), Some("Buy milk"));
        assert_eq!(normalize_title("   "), None);
        assert_eq!(normalize_title(""), None);
    }
}
