//! Webhook service configuration. Follows `ai-coach-cli/src/config/mod.rs`'s
//! `#[serde(default = "fn_name")]` + TOML round-trip pattern for the parts
//! that are safe to persist; secrets are loaded from the environment only,
//! per `config/app.rs`'s `env::var(...).unwrap_or_else(...)` convention —
//! never written to or read from the TOML file.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_env() -> Self {
        match env::var("PLANFORGE_ENV").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// The persisted, non-secret half of the webhook service's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_athletes_root")]
    pub athletes_root: PathBuf,

    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,

    #[serde(default = "default_rate_limit_per_day")]
    pub rate_limit_per_day: u32,
}

fn default_bind_address() -> String {
    "0.0.0.0:8787".to_string()
}

fn default_athletes_root() -> PathBuf {
    PathBuf::from("athletes")
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".webhook_state")
}

fn default_rate_limit_per_day() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            athletes_root: default_athletes_root(),
            store_dir: default_store_dir(),
            rate_limit_per_day: default_rate_limit_per_day(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not find home directory")?;
        Ok(home.join(".planforge"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("webhook.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;
        if !config_file.exists() {
            tracing::info!("webhook config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&config_file).context("failed to read webhook config file")?;
        let config: Config = toml::from_str(&contents).context("failed to parse webhook config file")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir).context("failed to create config directory")?;
        let contents = toml::to_string_pretty(self).context("failed to serialize webhook config")?;
        std::fs::write(Self::config_file()?, contents).context("failed to write webhook config file")?;
        Ok(())
    }

    pub fn idempotency_store_path(&self) -> PathBuf {
        self.store_dir.join("idempotency.json")
    }

    pub fn rate_limit_store_path(&self) -> PathBuf {
        self.store_dir.join("rate_limit.json")
    }

    pub fn order_log_path(&self) -> PathBuf {
        self.store_dir.join("order_log.jsonl")
    }
}

/// Secrets and environment-dependent switches, read straight from the
/// process environment and never persisted.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub hmac_shared_secret: Option<String>,
    pub cron_shared_secret: Option<String>,
    pub environment: Environment,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            hmac_shared_secret: env::var("PLANFORGE_WEBHOOK_SECRET").ok().filter(|s| !s.is_empty()),
            cron_shared_secret: env::var("PLANFORGE_CRON_SECRET").ok().filter(|s| !s.is_empty()),
            environment: Environment::from_env(),
        }
    }

    /// Signature verification is mandatory whenever a secret is configured;
    /// it may only be skipped in non-production with no secret set.
    pub fn signature_required(&self) -> bool {
        self.hmac_shared_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(config.bind_address, parsed.bind_address);
        assert_eq!(config.rate_limit_per_day, parsed.rate_limit_per_day);
    }

    #[test]
    fn store_paths_nest_under_store_dir() {
        let config = Config::default();
        assert_eq!(config.idempotency_store_path(), PathBuf::from(".webhook_state/idempotency.json"));
        assert_eq!(config.rate_limit_store_path(), PathBuf::from(".webhook_state/rate_limit.json"));
        assert_eq!(config.order_log_path(), PathBuf::from(".webhook_state/order_log.jsonl"));
    }
}
