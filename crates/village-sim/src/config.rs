//! Simulation run configuration.
//!
//! One TOML file covers the run itself plus an `[ai]` table for the
//! behaviour tunables. Command-line flags override file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use village_core::{AiConfig, ConfigError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Number of ticks to simulate
    pub ticks: u64,
    /// Villagers to spawn when not restoring
    pub villagers: usize,
    /// Where the final village snapshot is written
    pub snapshot_path: PathBuf,
    /// Where the JSONL event log is written
    pub events_path: PathBuf,
    /// Behaviour tunables
    pub ai: AiConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            ticks: 48_000,
            villagers: 12,
            snapshot_path: PathBuf::from("output/village_snapshot.json"),
            events_path: PathBuf::from("output/events.jsonl"),
            ai: AiConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::TomlSerializeError)
    }

    /// Loads from `path`, falling back to defaults if it is missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::info!("No simulation config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load simulation config from {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_nested_ai_table() {
        let config = SimulationConfig::from_str(
            "seed = 7\nvillagers = 3\n\n[ai]\nquirk_check_interval = 300\n",
        )
        .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.villagers, 3);
        assert_eq!(config.ticks, 48_000);
        assert_eq!(config.ai.quirk_check_interval, 300);
        assert!(config.ai.quirks_enabled);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SimulationConfig::default();
        let toml = config.to_toml().unwrap();
        assert_eq!(SimulationConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            SimulationConfig::load_or_default(&dir.path().join("village.toml")),
            SimulationConfig::default()
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ticks = 500").unwrap();
        assert_eq!(SimulationConfig::load_or_default(file.path()).ticks, 500);
    }
}
