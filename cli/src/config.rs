//! Operator CLI configuration. TOML-persisted, following
//! `ai-coach-cli/src/config/mod.rs`'s `#[serde(default = "fn_name")]` +
//! round-trip pattern.

use std::path::PathBuf;

use anyhow::{Context, Result};
use planforge_core::PipelineConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_athletes_root")]
    pub athletes_root: PathBuf,

    #[serde(default = "default_workouts_dir_name")]
    pub workouts_dir_name: String,

    #[serde(default = "default_true")]
    pub ftp_test_injection_enabled: bool,
}

fn default_athletes_root() -> PathBuf {
    PathBuf::from("athletes")
}

fn default_workouts_dir_name() -> String {
    "workouts".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            athletes_root: default_athletes_root(),
            workouts_dir_name: default_workouts_dir_name(),
            ftp_test_injection_enabled: true,
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("could not find home directory")?;
        Ok(home.join(".planforge"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("cli.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_file = Self::config_file()?;
        if !config_file.exists() {
            tracing::info!("cli config file not found, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(&config_file).context("failed to read CLI config file")?;
        let config: Config = toml::from_str(&contents).context("failed to parse CLI config file")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir).context("failed to create config directory")?;
        let contents = toml::to_string_pretty(self).context("failed to serialize CLI config")?;
        std::fs::write(Self::config_file()?, contents).context("failed to write CLI config file")?;
        Ok(())
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            athletes_root: self.athletes_root.clone(),
            workouts_dir_name: self.workouts_dir_name.clone(),
            ftp_test_injection_enabled: self.ftp_test_injection_enabled,
            rounding_granularity_minutes: 10,
        }
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
        assert_eq!(config.athletes_root, parsed.athletes_root);
        assert_eq!(config.workouts_dir_name, parsed.workouts_dir_name);
    }

    #[test]
    fn pipeline_config_mirrors_cli_config() {
        let config = Config::default();
        let pipeline_config = config.pipeline_config();
        assert_eq!(pipeline_config.athletes_root, config.athletes_root);
        assert_eq!(pipeline_config.workouts_dir_name, config.workouts_dir_name);
    }
}
