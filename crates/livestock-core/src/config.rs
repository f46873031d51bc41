//! Runtime configuration.
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `LIVESTOCK_*` environment variables (nested keys use `__`).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analytics::{DEFAULT_HORIZON_DAYS, MAX_HORIZON_DAYS};

const ENV_PREFIX: &str = "LIVESTOCK";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings shared by the core library and the scheduled jobs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalConfig {
    pub database_path: PathBuf,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// How far ahead vaccination reminders look
    pub reminder_horizon_days: i64,
    /// Age after which an unanswered enquiry triggers a seller reminder
    pub enquiry_reminder_after_hours: i64,
    /// Fixed seed for the demo feeds; random when unset
    #[serde(default)]
    pub demo_seed: Option<u64>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("livestock.db"),
            log_filter: "info".into(),
            reminder_horizon_days: DEFAULT_HORIZON_DAYS,
            enquiry_reminder_after_hours: 24,
            demo_seed: None,
        }
    }
}

impl PortalConfig {
    /// Load from defaults, `path` (if given and present) and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_from(path, None)
    }

    /// Like [`PortalConfig::load`], reading variables from `env` instead of
    /// the process environment when given.
    pub fn load_from(path: Option<&Path>, env: Option<HashMap<String, String>>) -> ConfigResult<Self> {
        let defaults = Self::default();
        let mut builder = Config::builder()
            .set_default("database_path", defaults.database_path.to_string_lossy().to_string())?
            .set_default("log_filter", defaults.log_filter)?
            .set_default("reminder_horizon_days", defaults.reminder_horizon_days)?
            .set_default(
                "enquiry_reminder_after_hours",
                defaults.enquiry_reminder_after_hours,
            )?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.check()?;
        tracing::debug!(?loaded, "configuration loaded");
        Ok(loaded)
    }

    fn check(&self) -> ConfigResult<()> {
        if !(0..=MAX_HORIZON_DAYS).contains(&self.reminder_horizon_days) {
            return Err(ConfigError::Invalid(format!(
                "reminder_horizon_days must be between 0 and {}",
                MAX_HORIZON_DAYS
            )));
        }
        if self.enquiry_reminder_after_hours <= 0 {
            return Err(ConfigError::Invalid(
                "enquiry_reminder_after_hours must be positive".into(),
            ));
        }
        Ok(())
    }
}
