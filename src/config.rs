//! Engine configuration.

use crate::error::{BetaError, Result};
use crate::layout::{ColorRange, LayoutConfig};
use crate::session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level configuration. Every section falls back to its defaults when
/// missing from the source.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub colors: ColorRange,
    pub session: SessionConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let distance = self.layout.disambiguation_distance;
        if !distance.is_finite() || distance < 0.0 {
            return Err(BetaError::Config(format!(
                "disambiguation_distance must be a non-negative number, got {}",
                distance
            )));
        }
        if self.session.event_buffer_size == 0 {
            return Err(BetaError::Config(
                "event_buffer_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
