//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory and are
//! read with defaults when the file is absent. Environment variables (a
//! `.env` file is honoured, see `main`) override the file:
//!
//! | Variable                | Field                   |
//! |-------------------------|-------------------------|
//! | `MOMENTUM_BACKEND`      | `backend`               |
//! | `MOMENTUM_USER_ID`      | `user.user_id`          |
//! | `SUPABASE_URL`          | `supabase.url`          |
//! | `SUPABASE_ANON_KEY`     | `supabase.anon_key`     |
//! | `SUPABASE_ACCESS_TOKEN` | `supabase.access_token` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use momentum::libs::config::Config;
//!
//! let config = Config::read()?.apply_env()?;
//! println!("backend: {}", config.backend);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::messages::Message;
use super::mock::DEV_USER_ID;
use crate::api::SupabaseConfig;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// A section of the configuration offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Which store implementation backs the session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Remote,
    #[default]
    Local,
    Mock,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [BackendKind::Remote, BackendKind::Local, BackendKind::Mock];

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Remote => "remote",
            BackendKind::Local => "local",
            BackendKind::Mock => "mock",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "remote" | "supabase" => Ok(BackendKind::Remote),
            "local" | "sqlite" => Ok(BackendKind::Local),
            "mock" | "dev" => Ok(BackendKind::Mock),
            other => Err(msg_error_anyhow!(Message::UnknownBackend(other.to_string()))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UserConfig {
    /// Owner of every task the session reads and writes.
    pub user_id: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LocalConfig {
    /// Database file; the data directory's `momentum.db` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_file: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supabase: Option<SupabaseConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<LocalConfig>,
}

impl Config {
    /// Path of the configuration file in the data directory.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads the configuration file, or the defaults when there is none.
    pub fn read() -> Result<Config> {
        Self::read_from(&Self::path()?)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        serde_json::from_str(&config_str).map_err(|e| msg_error_anyhow!(Message::ConfigParseError(e.to_string())))
    }

    /// Writes the configuration file. Returns where it was written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path).map_err(|e| msg_error_anyhow!(Message::ConfigSaveError(e.to_string())))?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies the environment overrides.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(backend) = var("MOMENTUM_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(user_id) = var("MOMENTUM_USER_ID") {
            self.user = Some(UserConfig { user_id });
        }

        let url = var("SUPABASE_URL");
        let anon_key = var("SUPABASE_ANON_KEY");
        let access_token = var("SUPABASE_ACCESS_TOKEN");
        if url.is_some() || anon_key.is_some() || access_token.is_some() {
            let supabase = self.supabase.get_or_insert_with(SupabaseConfig::default);
            if let Some(url) = url {
                supabase.url = url;
            }
            if let Some(anon_key) = anon_key {
                supabase.anon_key = anon_key;
            }
            if access_token.is_some() {
                supabase.access_token = access_token;
            }
        }

        Ok(self)
    }

    /// The configured user id. The mock backend falls back to the
    /// development account.
    pub fn user_id(&self) -> Option<String> {
        match &self.user {
            Some(user) if !user.user_id.trim().is_empty() => Some(user.user_id.trim().to_string()),
            _ if self.backend == BackendKind::Mock => Some(DEV_USER_ID.to_string()),
            _ => None,
        }
    }

    /// Remote settings, when complete.
    pub fn remote(&self) -> Result<&SupabaseConfig> {
        self.supabase
            .as_ref()
            .filter(|supabase| supabase.is_complete())
            .ok_or_else(|| msg_error_anyhow!(Message::RemoteConfigMissing))
    }

    /// Interactive setup. Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        msg_print!(Message::ConfigModuleBackend);
        let backends = BackendKind::ALL;
        let current = backends.iter().position(|kind| *kind == config.backend).unwrap_or(1);
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Where should tasks be stored?")
            .items(&backends.iter().map(BackendKind::as_str).collect::<Vec<_>>())
            .default(current)
            .interact()?;
        config.backend = backends[selected];

        msg_print!(Message::ConfigModuleUser);
        let default_user = config.user_id().unwrap_or_default();
        config.user = Some(UserConfig {
            user_id: Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Enter your user id")
                .default(default_user)
                .interact_text()?,
        });

        let modules = vec![
            SupabaseConfig::module(),
            ConfigModule {
                key: "local".to_string(),
                name: "Local database".to_string(),
            },
        ];
        let preselected: Vec<bool> = modules
            .iter()
            .map(|module| module.key == "supabase" && config.backend == BackendKind::Remote)
            .collect();
        let selected_modules = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select sections to configure")
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .defaults(&preselected)
            .interact()?;

        for &selection in &selected_modules {
            match modules[selection].key.as_str() {
                "supabase" => config.supabase = Some(SupabaseConfig::init(&config.supabase)?),
                "local" => {
                    msg_print!(Message::ConfigModuleLocal);
                    let current = config
                        .local
                        .as_ref()
                        .and_then(|local| local.db_file.as_ref())
                        .map(|path| path.display().to_string())
                        .unwrap_or_default();
                    let db_file: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt("Database file (leave empty for the default location)")
                        .default(current)
                        .allow_empty(true)
                        .interact_text()?;
                    config.local = Some(LocalConfig {
                        db_file: (!db_file.trim().is_empty()).then(|| PathBuf::from(db_file.trim())),
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_to_local_backend() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.backend, BackendKind::Local);
        assert_eq!(config.user_id(), None);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = Config {
            backend: BackendKind::Local,
            user: Some(UserConfig {
                user_id: "from-file".to_string(),
            }),
            ..Config::default()
        };

        let config = config
            .apply_vars(vars(&[
                ("MOMENTUM_BACKEND", "remote"),
                ("MOMENTUM_USER_ID", "from-env"),
                ("SUPABASE_URL", "https://demo.supabase.co"),
                ("SUPABASE_ANON_KEY", "anon"),
            ]))
            .unwrap();

        assert_eq!(config.backend, BackendKind::Remote);
        assert_eq!(config.user_id().as_deref(), Some("from-env"));
        assert_eq!(config.remote().unwrap().url, "https://demo.supabase.co");
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Config::default().apply_vars(vars(&[("MOMENTUM_BACKEND", "cloud")])).is_err());
    }

    #[test]
    fn remote_without_key_is_incomplete() {
        let config = Config::default()
            .apply_vars(vars(&[("SUPABASE_URL", "https://demo.supabase.co")]))
            .unwrap();
        assert!(config.remote().is_err());
    }

    #[test]
    fn mock_backend_uses_development_user() {
        let config = Config {
            backend: BackendKind::Mock,
            ..Config::default()
        };
        assert_eq!(config.user_id().as_deref(), Some(DEV_USER_ID));
    }
}
