//! Session-scoped user state.
//!
//! The display name is cached here once and shared by every component that
//! shows it. Readers clone the handle freely; the only writer is
//! [`ProfileService`](super::profile::ProfileService).

use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct UserSession {
    user_id: Arc<str>,
    display_name: Arc<RwLock<Option<String>>>,
}

impl UserSession {
    pub fn new(user_id: &str) -> Self {
        Self {
            user_id: Arc::from(user_id),
            display_name: Arc::new(RwLock::new(None)),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Cached display name, `None` until a profile has been loaded or created.
    pub fn display_name(&self) -> Option<String> {
        self.display_name.read().clone()
    }

    /// Greeting name with a fallback for users without a profile yet.
    pub fn greeting_name(&self) -> String {
        self.display_name().unwrap_or_else(|| "there".to_string())
    }

    pub(crate) fn set_display_name(&self, name: Option<String>) {
        *self.display_name.write() = name;
    }
}
