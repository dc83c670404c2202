//! Engine configuration
//!
//! Thresholds, ranking bonuses and preprocessing settings stored in TOML
//! format. Every knob ships a default matching deployed behavior; loading
//! validates ranges so a bad file fails fast instead of skewing results.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::preprocess::PreprocessConfig;
use crate::score::ScoreTable;

/// Configuration loading and validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Confidence gates applied along the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdConfig {
    /// Fragments from region crops must exceed this confidence
    pub region_min_confidence: f32,
    /// Fragments from the whole-image fallback must exceed this confidence
    /// (deliberately stricter than the region gate)
    pub fallback_min_confidence: f32,
    /// Minimum normalized fragment length kept for matching
    pub min_fragment_len: usize,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            region_min_confidence: 0.1,
            fallback_min_confidence: 0.2,
            min_fragment_len: 2,
        }
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Confidence gates
    pub thresholds: ThresholdConfig,
    /// Ranking bonuses per plate layout
    pub bonuses: ScoreTable,
    /// Crop and variant settings
    pub preprocess: PreprocessConfig,
}

impl EngineConfig {
    /// Check that every value is in a usable range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gates = [
            ("thresholds.region_min_confidence", self.thresholds.region_min_confidence),
            ("thresholds.fallback_min_confidence", self.thresholds.fallback_min_confidence),
        ];
        for (name, value) in gates {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0.0..=1.0, got {value}"
                )));
            }
        }

        if self.preprocess.min_upscale < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "preprocess.min_upscale must be at least 1.0, got {}",
                self.preprocess.min_upscale
            )));
        }

        Ok(())
    }
}

/// Load and validate configuration from a TOML file
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: EngineConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &EngineConfig, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
