//! Event configuration: venue, schedule and the thresholds above which conditions
//! count as adverse. Stored as camelCase JSON.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write config file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse config file '{0}'")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error("Failed to serialize config")]
    Serialize(#[source] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Values above which a field is shaded as adverse on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdverseThresholds {
    /// °F
    pub max_temp: f64,
    /// %
    pub min_rain_chance: f64,
    /// %
    pub min_sky_cover: f64,
}

impl Default for AdverseThresholds {
    fn default() -> Self {
        Self {
            max_temp: 80.0,
            min_rain_chance: 15.0,
            min_sky_cover: 50.0,
        }
    }
}

fn default_marker_label() -> String {
    "Kickoff".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConfig {
    pub name: String,
    /// Venue name shown in the dashboard header.
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA name for display only; chart labels use the offset of `start_date`.
    pub timezone: String,
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub adverse_conditions: AdverseThresholds,
    /// Text drawn next to the event-start line on every chart.
    #[serde(default = "default_marker_label")]
    pub marker_label: String,
}

impl EventConfig {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: EventConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates and writes the config as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, json).map_err(|e| ConfigError::Write(path.to_path_buf(), e))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::Invalid(format!(
                "latitude {} outside [-90, 90]",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::Invalid(format!(
                "longitude {} outside [-180, 180]",
                self.longitude
            )));
        }
        if self.end_date < self.start_date {
            return Err(ConfigError::Invalid(format!(
                "endDate {} is before startDate {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// The venue's UTC offset, taken from the start date.
    pub fn venue_offset(&self) -> FixedOffset {
        *self.start_date.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "name": "Super Bowl LX",
        "location": "Levi's Stadium",
        "latitude": 37.403147,
        "longitude": -121.969814,
        "timezone": "America/Los_Angeles",
        "startDate": "2026-02-08T15:30:00-08:00",
        "endDate": "2026-02-08T22:00:00-08:00",
        "adverseConditions": { "maxTemp": 75 }
    }"#;

    #[test]
    fn test_missing_thresholds_fall_back_per_key() {
        let config: EventConfig = serde_json::from_str(SAMPLE).expect("valid config");
        assert_eq!(config.adverse_conditions.max_temp, 75.0);
        assert_eq!(config.adverse_conditions.min_rain_chance, 15.0);
        assert_eq!(config.adverse_conditions.min_sky_cover, 50.0);
        assert_eq!(config.marker_label, "Kickoff");
        assert_eq!(config.venue_offset().local_minus_utc(), -8 * 3600);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("event.config.json");
        let config: EventConfig = serde_json::from_str(SAMPLE).expect("valid config");
        config.save(&path).expect("save");
        let loaded = EventConfig::load(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validation_rejects_bad_coordinates_and_dates() {
        let mut config: EventConfig = serde_json::from_str(SAMPLE).expect("valid config");
        config.latitude = 91.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config: EventConfig = serde_json::from_str(SAMPLE).expect("valid config");
        std::mem::swap(&mut config.start_date, &mut config.end_date);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = EventConfig::load(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(ConfigError::Read(_, _))));
    }
}
