//! Engine tunables and their TOML loader.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Seconds the human has to move.
pub const DEFAULT_TURN_LIMIT_SECS: f64 = 10.0;

/// Seconds the computer "thinks" before moving.
pub const DEFAULT_THINKING_DELAY_SECS: f64 = 3.0;

/// Probability that Easy plays a random square.
pub const DEFAULT_EASY_RANDOM_RATE: f64 = 0.7;

/// Probability that Medium plays a random square.
pub const DEFAULT_MEDIUM_RANDOM_RATE: f64 = 0.3;

/// Minimax depth cap in plies.
pub const DEFAULT_SEARCH_DEPTH: u8 = 6;

/// Timing and AI tunables.
///
/// Every key is optional in TOML; missing keys take the defaults.
///
/// ```toml
/// turn_limit_secs = 10.0
/// thinking_delay_secs = 3.0
/// easy_random_rate = 0.7
/// medium_random_rate = 0.3
/// search_depth = 6
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct EngineConfig {
    /// Human countdown per turn, in seconds.
    turn_limit_secs: f64,

    /// Delay before the computer moves, in seconds.
    thinking_delay_secs: f64,

    /// Chance that Easy bypasses strategy for a move.
    easy_random_rate: f64,

    /// Chance that Medium bypasses strategy for a move.
    medium_random_rate: f64,

    /// Depth cap for the Hard minimax fallback.
    search_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            turn_limit_secs: DEFAULT_TURN_LIMIT_SECS,
            thinking_delay_secs: DEFAULT_THINKING_DELAY_SECS,
            easy_random_rate: DEFAULT_EASY_RANDOM_RATE,
            medium_random_rate: DEFAULT_MEDIUM_RANDOM_RATE,
            search_depth: DEFAULT_SEARCH_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file and validates it.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading engine config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            turn_limit_secs = config.turn_limit_secs,
            thinking_delay_secs = config.thinking_delay_secs,
            search_depth = config.search_depth,
            "Engine config loaded"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that durations are positive and rates are probabilities.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, secs) in [
            ("turn_limit_secs", self.turn_limit_secs),
            ("thinking_delay_secs", self.thinking_delay_secs),
        ] {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(ConfigError::new(format!(
                    "{} must be a positive number of seconds, got {}",
                    name, secs
                )));
            }
            if Duration::try_from_secs_f64(secs).is_err() {
                return Err(ConfigError::new(format!(
                    "{} is too large to represent as a duration, got {}",
                    name, secs
                )));
            }
        }

        for (name, rate) in [
            ("easy_random_rate", self.easy_random_rate),
            ("medium_random_rate", self.medium_random_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ConfigError::new(format!(
                    "{} must be between 0 and 1, got {}",
                    name, rate
                )));
            }
        }

        if self.search_depth == 0 {
            return Err(ConfigError::new("search_depth must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Human countdown as a [`Duration`].
    ///
    /// Saturates on an unvalidated config instead of panicking.
    pub fn turn_limit(&self) -> Duration {
        saturating_duration(self.turn_limit_secs)
    }

    /// Computer thinking delay as a [`Duration`].
    ///
    /// Saturates on an unvalidated config instead of panicking.
    pub fn thinking_delay(&self) -> Duration {
        saturating_duration(self.thinking_delay_secs)
    }
}

/// Seconds to a [`Duration`], clamped to `[ZERO, MAX]`; NaN maps to zero.
fn saturating_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        Duration::ZERO
    } else {
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.turn_limit(), Duration::from_secs(10));
        assert_eq!(config.thinking_delay(), Duration::from_secs(3));
        assert_eq!(*config.search_depth(), 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml("turn_limit_secs = 5.0").unwrap();
        assert_eq!(config.turn_limit(), Duration::from_secs(5));
        assert_eq!(*config.medium_random_rate(), DEFAULT_MEDIUM_RANDOM_RATE);
    }

    #[test]
    fn test_rejects_rate_above_one() {
        let err = EngineConfig::from_toml("easy_random_rate = 1.5").unwrap_err();
        assert!(err.message.contains("easy_random_rate"));
    }

    #[test]
    fn test_rejects_non_positive_delay() {
        let config = EngineConfig::default().with_thinking_delay_secs(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unvalidated_durations_saturate() {
        let config = EngineConfig::default().with_turn_limit_secs(1e30);
        assert_eq!(config.turn_limit(), Duration::MAX);
        let config = EngineConfig::default().with_thinking_delay_secs(f64::NAN);
        assert_eq!(config.thinking_delay(), Duration::ZERO);
    }

    #[test]
    fn test_rejects_zero_depth() {
        let config = EngineConfig::default().with_search_depth(0);
        assert!(config.validate().is_err());
    }
}
