//! Configuration file support for the dumbbell planner.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dumbbell/config.toml`.
//! It only supplies starting values; every setting can still be changed at
//! runtime.

use crate::types::{is_valid_base_weight, MAX_BASE_WEIGHT};
use crate::{Difficulty, Error, Intensity, RestDuration, Result, Settings, TrainingDay};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub workout: WorkoutConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Default workout settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutConfig {
    /// Fixed day to plan for; today's weekday when unset
    #[serde(default)]
    pub day: Option<TrainingDay>,

    #[serde(default = "default_base_weight")]
    pub base_weight: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    #[serde(default)]
    pub intensity: Intensity,

    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,

    #[serde(default = "default_sets")]
    pub sets: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            day: None,
            base_weight: default_base_weight(),
            difficulty: Difficulty::default(),
            intensity: Intensity::default(),
            rest_seconds: default_rest_seconds(),
            sets: default_sets(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("dumbbell")
}

fn default_base_weight() -> u32 {
    20
}

fn default_rest_seconds() -> u32 {
    60
}

fn default_sets() -> u32 {
    4
}

impl WorkoutConfig {
    /// Turn the configured defaults into runtime settings
    pub fn settings(&self) -> Result<Settings> {
        if !is_valid_base_weight(self.base_weight) {
            return Err(Error::Config(format!(
                "base_weight must be between 1 and {}",
                MAX_BASE_WEIGHT
            )));
        }
        if self.sets == 0 {
            return Err(Error::Config("sets must be at least 1".into()));
        }
        let rest_duration = RestDuration::new(self.rest_seconds)
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Settings {
            day: self.day.unwrap_or_else(TrainingDay::today),
            base_weight: self.base_weight,
            difficulty: self.difficulty,
            intensity: self.intensity,
            rest_duration,
            sets: self.sets,
        })
    }
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("dumbbell").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.workout.base_weight, 20);
        assert_eq!(config.workout.rest_seconds, 60);
        assert_eq!(config.workout.sets, 4);
        assert_eq!(config.workout.difficulty, Difficulty::Intermediate);
        assert!(config.workout.day.is_none());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.workout.day = Some(TrainingDay::Wednesday);
        config.workout.rest_seconds = 45;
        config.save_to(&path).unwrap();

        let parsed = Config::load_from(&path).unwrap();
        assert_eq!(parsed.workout.day, Some(TrainingDay::Wednesday));
        assert_eq!(parsed.workout.rest_seconds, 45);
        assert_eq!(parsed.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[workout]
difficulty = "Advanced"
base_weight = 30
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.workout.difficulty, Difficulty::Advanced);
        assert_eq!(config.workout.base_weight, 30);
        assert_eq!(config.workout.rest_seconds, 60); // default
    }

    #[test]
    fn test_settings_rejects_bad_rest() {
        let mut workout = WorkoutConfig::default();
        workout.rest_seconds = 17;
        assert!(matches!(workout.settings(), Err(Error::Config(_))));

        workout.rest_seconds = 90;
        workout.day = Some(TrainingDay::Saturday);
        let settings = workout.settings().unwrap();
        assert_eq!(settings.rest_duration.seconds(), 90);
        assert_eq!(settings.day, TrainingDay::Saturday);
    }

    #[test]
    fn test_settings_rejects_out_of_range_weight() {
        let mut workout = WorkoutConfig::default();
        workout.base_weight = 0;
        assert!(matches!(workout.settings(), Err(Error::Config(_))));

        workout.base_weight = u32::MAX;
        assert!(matches!(workout.settings(), Err(Error::Config(_))));

        workout.base_weight = MAX_BASE_WEIGHT;
        assert_eq!(workout.settings().unwrap().base_weight, MAX_BASE_WEIGHT);
    }
}
