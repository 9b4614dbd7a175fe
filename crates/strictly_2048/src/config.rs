//! Game configuration loaded from TOML.

use crate::engine::{FOUR_PROBABILITY, WINNING_TILE};
use crate::error::ConfigError;
use crate::grid::DEFAULT_SIZE;
use crate::direction::Direction;
use crate::input::{SWIPE_THRESHOLD, Swipe};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Tunable parameters of a game session.
///
/// Every field has a default, so an empty TOML file is a valid config.
/// Deserialized values always pass [`GameConfig::validate`].
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    /// Board side length.
    size: usize,

    /// Tile value that counts as a win.
    target: u32,

    /// Chance that a spawned tile is a 4.
    four_probability: f64,

    /// Fixed RNG seed for reproducible games.
    seed: Option<u64>,

    /// Minimum swipe displacement, in pixels, along the dominant axis.
    swipe_threshold: f64,
}

/// Unvalidated config as read from TOML or JSON.
#[derive(Deserialize)]
struct RawGameConfig {
    #[serde(default = "default_size")]
    size: usize,
    #[serde(default = "default_target")]
    target: u32,
    #[serde(default = "default_four_probability")]
    four_probability: f64,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_swipe_threshold")]
    swipe_threshold: f64,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self, Self::Error> {
        let config = Self {
            size: raw.size,
            target: raw.target,
            four_probability: raw.four_probability,
            seed: raw.seed,
            swipe_threshold: raw.swipe_threshold,
        };
        config.validate()?;
        Ok(config)
    }
}

fn default_size() -> usize {
    DEFAULT_SIZE
}

fn default_target() -> u32 {
    WINNING_TILE
}

fn default_four_probability() -> f64 {
    FOUR_PROBABILITY
}

fn default_swipe_threshold() -> f64 {
    SWIPE_THRESHOLD
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            target: default_target(),
            four_probability: default_four_probability(),
            seed: None,
            swipe_threshold: default_swipe_threshold(),
        }
    }
}

impl GameConfig {
    /// Creates the default 4×4 configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the RNG seed replaced.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Loads and validates configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(size = config.size, target = config.target, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Classifies a swipe using the configured threshold.
    pub fn swipe_direction(&self, swipe: &Swipe) -> Option<Direction> {
        swipe.direction(self.swipe_threshold)
    }

    /// Checks that every field is within range.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::new(format!(
                "Board size must be at least 2, got {}",
                self.size
            )));
        }
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(ConfigError::new(format!(
                "Target must be a power of two >= 4, got {}",
                self.target
            )));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::new(format!(
                "four_probability must be within 0.0..=1.0, got {}",
                self.four_probability
            )));
        }
        if !self.swipe_threshold.is_finite() || self.swipe_threshold < 0.0 {
            return Err(ConfigError::new(format!(
                "swipe_threshold must be a non-negative number, got {}",
                self.swipe_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(*config.size(), 4);
        assert_eq!(*config.target(), 2048);
        assert_eq!(*config.seed(), None);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GameConfig::from_toml("target = 512\nseed = 7\n").unwrap();
        assert_eq!(*config.target(), 512);
        assert_eq!(*config.seed(), Some(7));
        assert_eq!(*config.size(), 4);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GameConfig::from_toml("size = 1").is_err());
        assert!(GameConfig::from_toml("target = 1000").is_err());
        assert!(GameConfig::from_toml("target = 2").is_err());
        assert!(GameConfig::from_toml("four_probability = 1.5").is_err());
        assert!(GameConfig::from_toml("swipe_threshold = -3.0").is_err());
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let err = serde_json::from_str::<GameConfig>(r#"{"size":0,"four_probability":7.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Board size"));

        let config: GameConfig = serde_json::from_str(r#"{"target":256}"#).unwrap();
        assert_eq!(*config.target(), 256);
        assert_eq!(*config.size(), 4);
    }

    #[test]
    fn test_swipe_uses_configured_threshold() {
        let config = GameConfig::from_toml("swipe_threshold = 50.0").unwrap();
        assert_eq!(config.swipe_direction(&Swipe::new(40.0, 0.0)), None);
        assert_eq!(
            config.swipe_direction(&Swipe::new(60.0, 10.0)),
            Some(Direction::Right)
        );
        assert_eq!(
            GameConfig::default().swipe_direction(&Swipe::new(40.0, 0.0)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = GameConfig::from_toml("size = \"big\"").unwrap_err();
        assert!(err.message.contains("Failed to parse config"));
    }
}
