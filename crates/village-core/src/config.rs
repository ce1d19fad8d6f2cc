//! AI Configuration
//!
//! Tunables for the behaviour core, loaded from TOML. Every field has a
//! default so a partial file (or none at all) is valid.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Behaviour tunables.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Ticks between automatic quirk checks for a villager
    pub quirk_check_interval: u64,
    /// Master switch for quirk application
    pub quirks_enabled: bool,
    /// Weight used when a quirk declares none
    pub default_quirk_weight: f32,
    /// Ticks between planning cycles for a villager
    pub decision_interval: u64,
    /// Upper bound on remembered shared experiences per villager
    pub max_shared_experiences: usize,
    /// Days after which a shared experience is forgotten
    pub experience_retention_days: u64,
    /// Home slots either side of a villager that count as "nearby"
    pub nearby_radius: usize,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            quirk_check_interval: 600,
            quirks_enabled: true,
            default_quirk_weight: 0.5,
            decision_interval: 200,
            max_shared_experiences: 64,
            experience_retention_days: 30,
            nearby_radius: 3,
        }
    }
}

impl AiConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Returns this configuration as a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerializeError)
    }

    /// Loads from `path`, falling back to defaults if it is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No AI config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load AI config from {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}
