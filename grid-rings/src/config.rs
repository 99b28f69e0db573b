//! Analysis configuration.
//!
//! Every parameter has a built-in default. A JSON file may override any
//! subset of fields; command-line flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Observer latitude used for the grid sweeps, in degrees
pub const DEFAULT_OBSERVER_LATITUDE_DEG: f64 = 48.0;

/// Maximum distance (degrees) between a point and the running ring mean
pub const DEFAULT_RING_THRESHOLD_DEG: f64 = 0.75;

/// Lower bound on cos(dec) in the hour-angle division
pub const DEFAULT_COS_DEC_FLOOR: f64 = 1e-14;

/// Rings whose |cos(dec)| is at or below this are excluded from the power-law fit
pub const DEFAULT_FIT_COS_FLOOR: f64 = 1e-6;

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Parameters for one analysis run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Observer latitude in degrees
    pub observer_latitude_deg: f64,
    /// Ring membership threshold in degrees of declination
    pub ring_threshold_deg: f64,
    /// Floor applied to cos(dec) before dividing by it
    pub cos_dec_floor: f64,
    /// Minimum |cos(dec)| for a ring to contribute a fit sample
    pub fit_cos_floor: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            observer_latitude_deg: DEFAULT_OBSERVER_LATITUDE_DEG,
            ring_threshold_deg: DEFAULT_RING_THRESHOLD_DEG,
            cos_dec_floor: DEFAULT_COS_DEC_FLOOR,
            fit_cos_floor: DEFAULT_FIT_COS_FLOOR,
        }
    }
}

impl AnalysisConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Observer latitude in radians
    pub fn observer_latitude_rad(&self) -> f64 {
        self.observer_latitude_deg.to_radians()
    }

    /// True when the latitude sits on a geographic pole, where cos(φ) = 0
    /// makes the hour angle undefined.
    pub fn has_degenerate_latitude(&self) -> bool {
        self.observer_latitude_deg.abs() == 90.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_match_grid_constants() {
        let config = AnalysisConfig::default();
        assert_eq!(config.observer_latitude_deg, 48.0);
        assert_eq!(config.ring_threshold_deg, 0.75);
        assert_eq!(config.cos_dec_floor, 1e-14);
        assert_eq!(config.fit_cos_floor, 1e-6);
        assert!(!config.has_degenerate_latitude());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{ "observer_latitude_deg": -33.5 }"#).unwrap();
        assert_relative_eq!(config.observer_latitude_deg, -33.5);
        assert_eq!(config.ring_threshold_deg, DEFAULT_RING_THRESHOLD_DEG);
        assert_eq!(config.fit_cos_floor, DEFAULT_FIT_COS_FLOOR);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rings.json");

        let config = AnalysisConfig {
            observer_latitude_deg: 51.5,
            ring_threshold_deg: 1.0,
            ..AnalysisConfig::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = AnalysisConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalysisConfig::load_from_file(Path::new("/nonexistent/rings.json"));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AnalysisConfig::load_from_file(&path),
            Err(ConfigError::Json { .. })
        ));
    }

    #[test]
    fn test_pole_latitude_is_degenerate() {
        let north = AnalysisConfig {
            observer_latitude_deg: 90.0,
            ..AnalysisConfig::default()
        };
        let south = AnalysisConfig {
            observer_latitude_deg: -90.0,
            ..AnalysisConfig::default()
        };
        assert!(north.has_degenerate_latitude());
        assert!(south.has_degenerate_latitude());
    }
}
