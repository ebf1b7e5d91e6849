//! Supabase (PostgREST) client implementing the store traits.
//!
//! Every request carries the project's `apikey` and a bearer token (the
//! user's access token when one is configured, the anon key otherwise).
//! Calls that address one record ask for a JSON object instead of an array,
//! so PostgREST answers "no rows" with [`NO_ROWS_CODE`](super::NO_ROWS_CODE)
//! which surfaces as `NotFound`.
//!
//! ## Tables
//!
//! | Table          | Store trait                                       |
//! |----------------|---------------------------------------------------|
//! | `tasks`        | [`TaskStore`]                                     |
//! | `users`        | [`ProfileStore`]                                  |
//! | `urgent_tasks` | [`UrgentTaskStore`] (unique on `user_id`)         |

use super::{expect_json, expect_success};
use crate::libs::config::ConfigModule;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::messages::Message;
use crate::libs::profile::UserProfile;
use crate::libs::store::{ProfileStore, TaskStore, UrgentTaskStore};
use crate::libs::task::{NewTask, Task, TaskOrder, TaskUpdate};
use crate::libs::urgent::UrgentTask;
use crate::msg_print;
use chrono::{DateTime, Utc};
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

const TASKS_TABLE: &str = "tasks";
const USERS_TABLE: &str = "users";
const URGENT_TABLE: &str = "urgent_tasks";

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";
const MERGE_DUPLICATES: &str = "resolution=merge-duplicates,return=representation";

/// Connection settings of a Supabase project.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct SupabaseConfig {
    /// Project URL without the `/rest/v1` suffix.
    pub url: String,
    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: String,
    /// Access token of a signed-in user. Row level security policies see
    /// this user; without it requests run as the anon role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl SupabaseConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "supabase".to_string(),
            name: "Supabase".to_string(),
        }
    }

    /// Whether both required settings are present.
    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Prompts for the project settings, defaulting to the current values.
    pub fn init(config: &Option<SupabaseConfig>) -> anyhow::Result<Self> {
        let config = config.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleSupabase);

        let access_token: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter a user access token (leave empty to use the anon key)")
            .default(config.access_token.unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        Ok(Self {
            url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter the Supabase project URL")
                .default(config.url)
                .interact_text()?,
            anon_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter the Supabase anon key")
                .default(config.anon_key)
                .interact_text()?,
            access_token: (!access_token.trim().is_empty()).then_some(access_token),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: Client,
    config: SupabaseConfig,
}

#[derive(Serialize)]
struct TaskInsert<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    task: &'a NewTask,
}

#[derive(Serialize)]
struct Stamped<'a, T> {
    #[serde(flatten)]
    fields: &'a T,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct OrderPatch {
    task_order: i64,
}

#[derive(Serialize)]
struct ProfileRow<'a> {
    id: &'a str,
    display_name: &'a str,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct UrgentRow<'a> {
    user_id: &'a str,
    title: &'a str,
    updated_at: DateTime<Utc>,
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

impl SupabaseStore {
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url.trim_end_matches('/'), table)
    }

    /// Base request with authentication headers.
    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let token = self.config.access_token.as_deref().unwrap_or(&self.config.anon_key);
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token)
    }

    /// Request whose response is a single JSON object.
    fn single(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, table)
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", RETURN_REPRESENTATION)
    }
}

impl TaskStore for SupabaseStore {
    async fn fetch_all(&self, user_id: &str) -> StoreResult<Vec<Task>> {
        let response = self
            .request(Method::GET, TASKS_TABLE)
            .query(&[("select", "*".to_string()), ("user_id", eq(user_id)), ("order", "task_order.asc".to_string())])
            .send()
            .await?;
        expect_json(response, "tasks").await
    }

    async fn create(&self, user_id: &str, task: &NewTask) -> StoreResult<Task> {
        let response = self
            .single(Method::POST, TASKS_TABLE)
            .json(&TaskInsert { user_id, task })
            .send()
            .await?;
        expect_json(response, "created task").await
    }

    async fn update(&self, task_id: &str, update: &TaskUpdate) -> StoreResult<Task> {
        let response = self
            .single(Method::PATCH, TASKS_TABLE)
            .query(&[("id", eq(task_id))])
            .json(&Stamped {
                fields: update,
                updated_at: Utc::now(),
            })
            .send()
            .await?;
        expect_json(response, &format!("task {task_id}")).await
    }

    async fn remove(&self, task_id: &str) -> StoreResult<()> {
        let response = self
            .request(Method::DELETE, TASKS_TABLE)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(&[("id", eq(task_id))])
            .send()
            .await?;
        let removed: Vec<Task> = expect_json(response, &format!("task {task_id}")).await?;
        if removed.is_empty() {
            return Err(StoreError::NotFound(format!("task {task_id}")));
        }
        Ok(())
    }

    /// One PATCH per pair. PostgREST has no multi-row update with distinct
    /// values, so a failure part way leaves the earlier pairs written.
    async fn bulk_set_order(&self, orders: &[TaskOrder]) -> StoreResult<()> {
        for pair in orders {
            let response = self
                .request(Method::PATCH, TASKS_TABLE)
                .header("Prefer", RETURN_MINIMAL)
                .query(&[("id", eq(&pair.id))])
                .json(&OrderPatch { task_order: pair.order })
                .send()
                .await?;
            expect_success(response, &format!("task {}", pair.id)).await.map_err(|err| {
                tracing::warn!(id = %pair.id, order = pair.order, error = %err, "order update failed");
                err
            })?;
        }
        Ok(())
    }

    async fn next_order_value(&self, user_id: &str) -> StoreResult<i64> {
        let response = self
            .request(Method::GET, TASKS_TABLE)
            .query(&[("select", "id".to_string()), ("user_id", eq(user_id))])
            .send()
            .await?;
        let ids: Vec<IgnoredAny> = expect_json(response, "task ids").await?;
        Ok(ids.len() as i64)
    }
}

impl ProfileStore for SupabaseStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        let response = self
            .request(Method::GET, USERS_TABLE)
            .header("Accept", SINGLE_OBJECT)
            .query(&[("select", "*".to_string()), ("id", eq(user_id))])
            .send()
            .await?;
        expect_json(response, &format!("profile {user_id}")).await
    }

    async fn upsert_profile(&self, user_id: &str, display_name: &str) -> StoreResult<UserProfile> {
        let response = self
            .request(Method::POST, USERS_TABLE)
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", MERGE_DUPLICATES)
            .query(&[("on_conflict", "id")])
            .json(&ProfileRow {
                id: user_id,
                display_name,
                updated_at: Utc::now(),
            })
            .send()
            .await?;
        expect_json(response, &format!("profile {user_id}")).await
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        let response = self
            .single(Method::PATCH, USERS_TABLE)
            .query(&[("id", eq(user_id))])
            .json(&serde_json::json!({ "display_name": display_name, "updated_at": Utc::now() }))
            .send()
            .await?;
        let _: UserProfile = expect_json(response, &format!("profile {user_id}")).await?;
        Ok(())
    }
}

impl UrgentTaskStore for SupabaseStore {
    async fn get_urgent_task(&self, user_id: &str) -> StoreResult<Option<UrgentTask>> {
        let response = self
            .request(Method::GET, URGENT_TABLE)
            .query(&[
                ("select", "*".to_string()),
                ("user_id", eq(user_id)),
                ("order", "created_at.desc".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await?;
        let tasks: Vec<UrgentTask> = expect_json(response, "urgent task").await?;
        Ok(tasks.into_iter().next())
    }

    async fn upsert_urgent_task(&self, user_id: &str, title: &str) -> StoreResult<UrgentTask> {
        let response = self
            .request(Method::POST, URGENT_TABLE)
            .header("Accept", SINGLE_OBJECT)
            .header("Prefer", MERGE_DUPLICATES)
            .query(&[("on_conflict", "user_id")])
            .json(&UrgentRow {
                user_id,
                title,
                updated_at: Utc::now(),
            })
            .send()
            .await?;
        expect_json(response, &format!("urgent task of {user_id}")).await
    }

    async fn delete_urgent_task(&self, user_id: &str) -> StoreResult<()> {
        let response = self
            .request(Method::DELETE, URGENT_TABLE)
            .header("Prefer", RETURN_MINIMAL)
            .query(&[("user_id", eq(user_id))])
            .send()
            .await?;
        expect_success(response, &format!("urgent task of {user_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(access_token: Option<&str>) -> SupabaseStore {
        SupabaseStore::new(&SupabaseConfig {
            url: "https://demo.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
            access_token: access_token.map(str::to_string),
        })
    }

    #[test]
    fn requests_carry_both_keys() {
        let request = store(Some("user-jwt")).request(Method::GET, TASKS_TABLE).build().unwrap();

        assert_eq!(request.url().as_str(), "https://demo.supabase.co/rest/v1/tasks");
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer user-jwt");
    }

    #[test]
    fn anon_key_is_the_fallback_token() {
        let request = store(None).request(Method::GET, TASKS_TABLE).build().unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer anon");
    }

    #[test]
    fn single_record_requests_ask_for_an_object() {
        let request = store(None)
            .single(Method::PATCH, TASKS_TABLE)
            .query(&[("id", eq("t-1"))])
            .build()
            .unwrap();

        assert_eq!(request.headers()["accept"], SINGLE_OBJECT);
        assert_eq!(request.url().query(), Some("id=eq.t-1"));
    }

    #[test]
    fn insert_body_flattens_the_new_task() {
        let task = NewTask {
            title: "Call".to_string(),
            description: String::new(),
            due_date: None,
            order: 4,
        };
        let body = serde_json::to_value(TaskInsert { user_id: "u1", task: &task }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "user_id": "u1", "title": "Call", "description": "", "due_date": null, "task_order": 4 })
        );
    }

    #[test]
    fn config_is_complete_only_with_url_and_key() {
        let mut config = SupabaseConfig::default();
        assert!(!config.is_complete());
        config.url = "https://demo.supabase.co".to_string();
        config.anon_key = "anon".to_string();
        assert!(config.is_complete());
    }

    #[test]
    fn order_patch_only_sends_the_position() {
        let body = serde_json::to_value(OrderPatch { task_order: 2 }).unwrap();
        assert_eq!(body, serde_json::json!({ "task_order": 2 }));
    }
}
