//! Server configuration
//!
//! Values come from the shuttle `SecretStore` first and the process
//! environment (optionally seeded from a `.env` file) second.

use anyhow::{bail, Context};

use chronopal::domain::MAX_BATTERY;
use chronopal::LifecycleConfig;

use crate::adapters::openai::DEFAULT_MODEL;

/// Where pets are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            other => bail!("Unknown STORAGE_BACKEND: {}", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bearer token guarding the API; `None` disables auth
    pub api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub storage: StorageBackend,
    pub lifecycle: LifecycleConfig,
}

impl AppConfig {
    /// Load from shuttle secrets with environment fallback
    pub fn from_secrets(secrets: &shuttle_runtime::SecretStore) -> anyhow::Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(".env not loaded: {}", e);
        }

        Self::from_lookup(|key| secrets.get(key).or_else(|| std::env::var(key).ok()))
    }

    /// Load from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage = match get("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Postgres,
        };

        let mut lifecycle = LifecycleConfig::default();
        if let Some(hours) = get("NEGLECT_THRESHOLD_HOURS") {
            lifecycle.neglect_threshold_hours = hours
                .trim()
                .parse()
                .context("NEGLECT_THRESHOLD_HOURS must be a whole number of hours")?;
            if lifecycle.neglect_threshold_hours < 1 {
                bail!("NEGLECT_THRESHOLD_HOURS must be at least 1");
            }
        }
        if let Some(threshold) = get("RESET_BATTERY_THRESHOLD") {
            lifecycle.reset_battery_threshold = threshold
                .trim()
                .parse()
                .context("RESET_BATTERY_THRESHOLD must be an integer")?;
            if !(0..=MAX_BATTERY).contains(&lifecycle.reset_battery_threshold) {
                bail!("RESET_BATTERY_THRESHOLD must be between 0 and {}", MAX_BATTERY);
            }
        }

        Ok(Self {
            api_key: get("CHRONOPAL_API_KEY"),
            openai_api_key: get("OPENAI_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            storage,
            lifecycle,
        })
    }
}
