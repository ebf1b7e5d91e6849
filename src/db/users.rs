use super::tasks::LocalStore;
use crate::libs::error::{StoreError, StoreResult};
use crate::libs::profile::UserProfile;
use crate::libs::store::ProfileStore;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

const SELECT_PROFILE: &str = "SELECT id, display_name, created_at, updated_at FROM users WHERE id = ?1";
const UPSERT_PROFILE: &str = "INSERT INTO users (id, display_name, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)
    ON CONFLICT(id) DO UPDATE SET display_name = excluded.display_name, updated_at = excluded.updated_at";
const UPDATE_NAME: &str = "UPDATE users SET display_name = ?2, updated_at = ?3 WHERE id = ?1";

fn select_profile(conn: &Connection, user_id: &str) -> StoreResult<UserProfile> {
    conn.query_row(SELECT_PROFILE, params![user_id], |row| {
        Ok(UserProfile {
            id: row.get(0)?,
            display_name: row.get(1)?,
            created_at: row.get(2)?,
            updated_at: row.get(3)?,
        })
    })
    .optional()?
    .ok_or_else(|| StoreError::NotFound(format!("profile {user_id}")))
}

impl ProfileStore for LocalStore {
    async fn get_profile(&self, user_id: &str) -> StoreResult<UserProfile> {
        select_profile(&self.conn.lock(), user_id)
    }

    async fn upsert_profile(&self, user_id: &str, display_name: &str) -> StoreResult<UserProfile> {
        let conn = self.conn.lock();
        conn.execute(UPSERT_PROFILE, params![user_id, display_name, Utc::now()])?;
        select_profile(&conn, user_id)
    }

    async fn update_display_name(&self, user_id: &str, display_name: &str) -> StoreResult<()> {
        let conn = self.conn.lock();
        match conn.execute(UPDATE_NAME, params![user_id, display_name, Utc::now()])? {
            0 => Err(StoreError::NotFound(format!("profile {user_id}"))),
            _ => Ok(()),
        }
    }
}
