//! Run configuration
//!
//! Loads a headless run's parameters from a TOML file so the flock can be
//! tuned without recompiling. Every field has a default, so a file only needs
//! the values it changes:
//!
//! ```toml
//! agents = 300
//! ticks = 2000
//! update_order = "two_phase"
//!
//! [behavior]
//! shape = "box"
//! center_dist = 800.0
//!
//! [follow]
//! offset = [0.0, 10.0, -40.0]
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::flock::UpdateOrder;
use crate::math::Vec3;
use crate::params::BehaviorSettings;
use crate::{FOLLOW_MAX_FORCE, FOLLOW_OFFSET, FOLLOW_SPEED_FACTOR};

/// Default settings file path
pub const DEFAULT_CONFIG_PATH: &str = "boids.toml";

// Path reported for settings parsed from a string
pub const INLINE_CONFIG_PATH: &str = "<inline>";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level configuration of a headless run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub agents: usize,
    pub ticks: u64,
    pub seed: u64,
    pub update_order: UpdateOrder,
    /// Ticks between centroid reports, 0 disables them
    pub report_interval: u64,
    pub behavior: BehaviorSettings,
    pub follow: FollowSettings,
}

/// Follow controller used by the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowSettings {
    /// Top speed as a multiple of the boids' `max_speed`
    pub speed_factor: f32,
    pub max_force: f32,
    pub offset: Vec3,
}

impl Default for FollowSettings {
    fn default() -> Self {
        Self {
            speed_factor: FOLLOW_SPEED_FACTOR,
            max_force: FOLLOW_MAX_FORCE,
            offset: FOLLOW_OFFSET,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agents: 100,
            ticks: 1000,
            seed: 42,
            update_order: UpdateOrder::Sequential,
            report_interval: 100,
            behavior: BehaviorSettings::default(),
            follow: FollowSettings::default(),
        }
    }
}

impl SimulationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Self::parse(contents, Path::new(INLINE_CONFIG_PATH))
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BoundaryShape;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let config = SimulationConfig::from_toml_str(
            r#"
            agents = 12
            update_order = "parallel"

            [behavior]
            shape = "box"
            separation_weight = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.agents, 12);
        assert_eq!(config.ticks, SimulationConfig::default().ticks);
        assert_eq!(config.update_order, UpdateOrder::Parallel);
        assert_eq!(config.behavior.shape, BoundaryShape::Box);
        assert_eq!(config.behavior.separation_weight, 0.5);
        assert_eq!(config.behavior.max_speed, BehaviorSettings::default().max_speed);
    }

    #[test]
    fn unknown_shape_is_a_parse_error() {
        let err = SimulationConfig::from_toml_str("[behavior]\nshape = \"torus\"\n").unwrap_err();
        assert!(matches!(&err, ConfigError::Parse { path, .. } if path == Path::new(INLINE_CONFIG_PATH)));
        assert!(err.to_string().contains(INLINE_CONFIG_PATH));
    }

    #[test]
    fn follow_section_overrides_controller_tuning() {
        let config = SimulationConfig::from_toml_str(
            r#"
            [follow]
            max_force = 0.8
            offset = [0.0, 5.0, -10.0]
            "#,
        )
        .unwrap();

        assert_eq!(config.follow.max_force, 0.8);
        assert_eq!(config.follow.offset, Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(config.follow.speed_factor, FOLLOW_SPEED_FACTOR);
        assert_eq!(SimulationConfig::default().follow.offset, FOLLOW_OFFSET);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let err = SimulationConfig::load("definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here.toml"));
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let config = SimulationConfig {
            agents: 7,
            update_order: UpdateOrder::TwoPhase,
            ..Default::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }
}
