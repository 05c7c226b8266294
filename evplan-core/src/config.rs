//! Global evplan configuration.

use std::path::{Path, PathBuf};

use chrono::Duration;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_EVENT_DURATION_MINUTES, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, MAX_EVENT_DURATION_MINUTES,
};
use crate::error::{PlannerError, PlannerResult};
use crate::event::Coordinates;

static DEFAULT_DATA_DIR: &str = "~/.evplan";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_event_duration_minutes() -> i64 {
    DEFAULT_EVENT_DURATION_MINUTES
}

/// Configuration at ~/.config/evplan/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Where the persisted slots live.
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Map center used when the device position is unknown.
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    #[serde(default = "default_longitude")]
    pub default_longitude: f64,

    /// Length of calendar entries created from events.
    #[serde(default = "default_event_duration_minutes")]
    pub event_duration_minutes: i64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_dir: default_data_dir(),
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
            event_duration_minutes: DEFAULT_EVENT_DURATION_MINUTES,
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> PlannerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlannerError::Config("Could not determine config directory".into()))?
            .join("evplan");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the global config, writing a commented default file on first run.
    pub fn load() -> PlannerResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> PlannerResult<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| PlannerError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| PlannerError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if !(1..=MAX_EVENT_DURATION_MINUTES).contains(&self.event_duration_minutes) {
            return Err(PlannerError::Config(format!(
                "event_duration_minutes must be between 1 and {}, got {}",
                MAX_EVENT_DURATION_MINUTES, self.event_duration_minutes
            )));
        }
        if !(-90.0..=90.0).contains(&self.default_latitude)
            || !(-180.0..=180.0).contains(&self.default_longitude)
        {
            return Err(PlannerError::Config(
                "default_latitude/default_longitude out of range".into(),
            ));
        }
        Ok(())
    }

    /// Data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn default_coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.default_latitude,
            longitude: self.default_longitude,
        }
    }

    /// Entry length, clamped to the range `validate` accepts.
    pub fn event_duration(&self) -> Duration {
        Duration::minutes(
            self.event_duration_minutes
                .clamp(1, MAX_EVENT_DURATION_MINUTES),
        )
    }

    pub fn save(&self, path: &Path) -> PlannerResult<()> {
        self.validate()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| PlannerError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> PlannerResult<()> {
        let contents = format!(
            "\
# evplan configuration

# Where events and accounts are stored:
# data_dir = \"{}\"

# Map center used when the device location is unavailable:
# default_latitude = {}
# default_longitude = {}

# Length of calendar entries created from events, in minutes:
# event_duration_minutes = {}
",
            DEFAULT_DATA_DIR, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_EVENT_DURATION_MINUTES
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PlannerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PlannerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_loads_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("evplan/config.toml");

        PlannerConfig::create_default_config(&path).unwrap();
        let config = PlannerConfig::load_from(&path).unwrap();

        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.event_duration(), Duration::hours(2));
    }

    #[test]
    fn test_missing_file_loads_as_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load_from(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/var/lib/evplan\"\nevent_duration_minutes = 45\ndefault_latitude = 48.85\n",
        )
        .unwrap();

        let config = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/var/lib/evplan"));
        assert_eq!(config.event_duration(), Duration::minutes(45));
        assert_eq!(config.default_coordinates().latitude, 48.85);
        assert_eq!(config.default_longitude, DEFAULT_LONGITUDE);
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "event_duration_minutes = 0\n").unwrap();

        assert!(matches!(
            PlannerConfig::load_from(&path),
            Err(PlannerError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_duration_over_a_year() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        std::fs::write(&path, "event_duration_minutes = 1000000000000\n").unwrap();
        assert!(matches!(
            PlannerConfig::load_from(&path),
            Err(PlannerError::Config(_))
        ));

        std::fs::write(&path, "event_duration_minutes = 525600\n").unwrap();
        assert_eq!(
            PlannerConfig::load_from(&path).unwrap().event_duration(),
            Duration::days(365)
        );
    }

    #[test]
    fn test_event_duration_is_clamped() {
        let config = PlannerConfig {
            event_duration_minutes: i64::MAX,
            ..PlannerConfig::default()
        };
        assert_eq!(config.event_duration(), Duration::days(365));
    }

    #[test]
    fn test_save_refuses_invalid_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let config = PlannerConfig {
            default_latitude: 120.0,
            ..PlannerConfig::default()
        };
        assert!(config.save(&path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_round_trip_omits_default_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let mut config = PlannerConfig::default();
        config.event_duration_minutes = 90;
        config.save(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("data_dir"));
        assert_eq!(PlannerConfig::load_from(&path).unwrap(), config);
    }
}
