/*
 * Configuration Module
 *
 * Loads window, flock and engine settings from a TOML file. Every table
 * and every key is optional; anything left out keeps its default.
 *
 *   [window]
 *   width = 1600
 *   height = 800
 *
 *   [flock]
 *   initial_entities = 30
 *   repulsion_radius = 50.0
 *   group_radius = 140.0
 *   seed = 42
 *
 *   [params]
 *   cohesion_weight = 0.7
 *   fov_enabled = false
 */

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::flock::Flock;
use crate::params::SimulationParams;
use crate::viewport::Viewport;
use crate::{DEFAULT_GROUP_RADIUS, DEFAULT_REPULSION_RADIUS, INITIAL_ENTITIES, MAX_ENTITIES, MIN_RADIUS};

/// Default config file path, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "flock.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: &'static str) -> Self {
        ConfigError::Invalid { field, reason }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub window: WindowConfig,
    pub flock: FlockConfig,
    pub params: SimulationParams,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlockConfig {
    pub initial_entities: usize,
    pub repulsion_radius: f32,
    pub group_radius: f32,
    // Fixed seed for reproducible runs; entropy when absent
    pub seed: Option<u64>,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 800,
            title: "Flocking simulator".to_string(),
        }
    }
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            initial_entities: INITIAL_ENTITIES,
            repulsion_radius: DEFAULT_REPULSION_RADIUS,
            group_radius: DEFAULT_GROUP_RADIUS,
            seed: None,
        }
    }
}

impl Config {
    /// Reads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::invalid("window", "width and height must be non-zero"));
        }
        if self.flock.initial_entities > MAX_ENTITIES {
            return Err(ConfigError::invalid("initial_entities", "exceeds the flock capacity"));
        }

        let (repulsion, group) = (self.flock.repulsion_radius, self.flock.group_radius);
        if !repulsion.is_finite() || repulsion < MIN_RADIUS {
            return Err(ConfigError::invalid("repulsion_radius", "must be a finite number of at least 10"));
        }
        if !group.is_finite() || group < repulsion {
            return Err(ConfigError::invalid("group_radius", "must be at least the repulsion radius"));
        }

        self.params.validate()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.window.width, self.window.height)
    }

    /// Seeded generator when a seed is configured, otherwise from entropy.
    pub fn rng(&self) -> SmallRng {
        match self.flock.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        }
    }

    /// An empty flock with the configured radii.
    pub fn empty_flock(&self) -> Flock {
        Flock::with_radii(self.flock.repulsion_radius, self.flock.group_radius)
    }
}
