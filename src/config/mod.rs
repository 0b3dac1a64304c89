//! Engine configuration.
//!
//! Every tunable constant of the matching and recommendation engine lives in
//! [`EngineConfig`]. A YAML document may override any subset of the fields;
//! the rest keep their defaults.

use crate::recommend::{StrategyAllocation, DEFAULT_PANTRY_MIN_MATCH};
use crate::{DEFAULT_CAN_MAKE_THRESHOLD, DEFAULT_MAX_MISSING};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recipes at or below this many minutes are offered as quick recipes
pub const DEFAULT_QUICK_PREP_MINUTES: u32 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Tunable thresholds and weights
///
/// # Examples
///
/// ```
/// # use pantry_match::EngineConfig;
/// let config = EngineConfig::from_yaml_str("can_make_threshold: 90\nallocation:\n  quick: 0")?;
///
/// assert_eq!(config.can_make_threshold, 90);
/// assert_eq!(config.pantry_min_match, 50);
/// assert_eq!(config.allocation.quick, 0);
/// assert_eq!(config.allocation.pantry_based, 40);
/// # Ok::<(), pantry_match::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Match percentage at which a recipe counts as makeable
    pub can_make_threshold: u8,
    /// Minimum match percentage for pantry-based recommendations
    pub pantry_min_match: u8,
    /// Most missing ingredients an "almost makeable" recipe may have
    pub max_missing: usize,
    /// Longest preparation time for quick recipes, in minutes
    pub quick_prep_minutes: u32,
    /// Share of the limit each recommendation strategy may fill
    pub allocation: StrategyAllocation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            can_make_threshold: DEFAULT_CAN_MAKE_THRESHOLD,
            pantry_min_match: DEFAULT_PANTRY_MIN_MATCH,
            max_missing: DEFAULT_MAX_MISSING,
            quick_prep_minutes: DEFAULT_QUICK_PREP_MINUTES,
            allocation: StrategyAllocation::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML config document.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::YamlError` for malformed YAML or unknown keys and
    /// `ConfigError::Invalid` for out of range values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML config file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("can_make_threshold", self.can_make_threshold),
            ("pantry_min_match", self.pantry_min_match),
        ] {
            if value > 100 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be at most 100, got {value}"
                )));
            }
        }

        let allocation = &self.allocation;
        let shares = [
            allocation.pantry_based,
            allocation.favorites_based,
            allocation.popular,
            allocation.quick,
        ];
        if shares.iter().any(|&share| share > 100) {
            return Err(ConfigError::Invalid(
                "allocation percentages must be at most 100".to_string(),
            ));
        }
        if shares.iter().all(|&share| share == 0) {
            return Err(ConfigError::Invalid(
                "at least one allocation percentage must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}
