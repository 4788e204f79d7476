//! Plain configuration data passed into the pipeline by its caller (the CLI
//! or the webhook crate). Unlike the two binaries' own `Config`, this is
//! not a TOML-loaded singleton — the orchestrator takes one of these per
//! run rather than owning global state.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub athletes_root: PathBuf,
    pub workouts_dir_name: String,
    pub ftp_test_injection_enabled: bool,
    pub rounding_granularity_minutes: u32,
}

impl PipelineConfig {
    pub fn athlete_dir(&self, athlete_id: &str) -> PathBuf {
        self.athletes_root.join(athlete_id)
    }

    pub fn workouts_dir(&self, athlete_id: &str) -> PathBuf {
        self.athlete_dir(athlete_id).join(&self.workouts_dir_name)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            athletes_root: PathBuf::from("athletes"),
            workouts_dir_name: "workouts".to_string(),
            ftp_test_injection_enabled: true,
            rounding_granularity_minutes: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn athlete_dir_joins_root_and_id() {
        let config = PipelineConfig::default();
        assert_eq!(config.athlete_dir("jane"), PathBuf::from("athletes/jane"));
    }

    #[test]
    fn workouts_dir_nests_under_athlete_dir() {
        let config = PipelineConfig::default();
        assert_eq!(config.workouts_dir("jane"), PathBuf::from("athletes/jane/workouts"));
    }
}
