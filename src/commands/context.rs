use crate::libs::backend::Backend;
use crate::libs::config::Config;
use crate::libs::feedback::ConsoleFeedback;
use crate::libs::manager::TaskOrderManager;
use crate::libs::messages::Message;
use crate::libs::profile::ProfileService;
use crate::libs::session::UserSession;
use crate::libs::urgent::UrgentTaskService;
use crate::msg_error_anyhow;
use anyhow::Result;
use std::sync::Arc;

/// Everything a command needs: configuration, the chosen store and the
/// user's session.
pub struct AppContext {
    pub config: Config,
    pub backend: Backend,
    pub session: UserSession,
}

impl AppContext {
    /// Reads the configuration (file plus environment) and opens the store.
    pub fn load() -> Result<Self> {
        let config = Config::read()?.apply_env()?;
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let user_id = config.user_id().ok_or_else(|| msg_error_anyhow!(Message::UserIdMissing))?;
        let backend = Backend::from_config(&config)?;
        Ok(Self {
            session: UserSession::new(&user_id),
            config,
            backend,
        })
    }

    pub fn user_id(&self) -> &str {
        self.session.user_id()
    }

    /// Manager printing completion feedback on the console.
    pub fn manager(&self) -> TaskOrderManager<Backend> {
        TaskOrderManager::new(self.backend.clone(), self.user_id()).with_feedback(Arc::new(ConsoleFeedback))
    }

    /// Manager with the user's list already loaded.
    pub async fn loaded_manager(&self) -> Result<TaskOrderManager<Backend>> {
        let mut manager = self.manager();
        manager.load().await?;
        Ok(manager)
    }

    pub fn profiles(&self) -> ProfileService<Backend> {
        ProfileService::new(self.backend.clone(), self.session.clone())
    }

    pub fn urgent(&self) -> UrgentTaskService<Backend> {
        UrgentTaskService::new(self.backend.clone(), self.user_id())
    }
}
