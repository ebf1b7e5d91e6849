//! User profile record and the service that owns display-name writes.

use super::error::{Result, TaskError};
use super::session::UserSession;
use super::store::ProfileStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reads and writes the profile, keeping [`UserSession`] in step.
pub struct ProfileService<S> {
    store: S,
    session: UserSession,
}

impl<S: ProfileStore> ProfileService<S> {
    pub fn new(store: S, session: UserSession) -> Self {
        Self { store, session }
    }

    pub fn session(&self) -> &UserSession {
        &self.session
    }

    /// Loads the profile into the session.
    ///
    /// A missing profile is the normal first-run state and yields `Ok(None)`.
    pub async fn load(&self) -> Result<Option<UserProfile>> {
        match self.store.get_profile(self.session.user_id()).await {
            Ok(profile) => {
                self.session.set_display_name(Some(profile.display_name.clone()));
                Ok(Some(profile))
            }
            Err(err) => match TaskError::from(err) {
                TaskError::NotFound(_) => {
                    tracing::debug!(user_id = self.session.user_id(), "no profile yet");
                    self.session.set_display_name(None);
                    Ok(None)
                }
                other => {
                    tracing::warn!(user_id = self.session.user_id(), error = %other, "profile load failed");
                    Err(other)
                }
            },
        }
    }

    /// Creates the profile on first run, or overwrites the name if one exists.
    pub async fn complete_onboarding(&self, display_name: &str) -> Result<UserProfile> {
        let name = validate_name(display_name)?;
        let profile = self
            .store
            .upsert_profile(self.session.user_id(), name)
            .await
            .map_err(|err| log_failure("upsert_profile", err))?;
        self.session.set_display_name(Some(profile.display_name.clone()));
        Ok(profile)
    }

    pub async fn rename(&self, display_name: &str) -> Result<()> {
        let name = validate_name(display_name)?;
        self.store
            .update_display_name(self.session.user_id(), name)
            .await
            .map_err(|err| log_failure("update_display_name", err))?;
        self.session.set_display_name(Some(name.to_string()));
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(TaskError::Validation("display name must not be empty".to_string()));
    }
    Ok(trimmed)
}

fn log_failure(operation: &str, err: super::error::StoreError) -> TaskError {
    tracing::warn!(operation, error = %err, "profile store call failed");
    err.into()
}
