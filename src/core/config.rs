//! Configuration management

use crate::core::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub index: IndexConfig,
    pub service: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Decoded path prefixes whose sources are never indexed
    pub exclude_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Whether the API layer may write back to indexed points
    pub allow_write: bool,
    /// Rebuild once when the host reaches steady state
    pub rebuild_on_steady_state: bool,
    /// Capacity of the rebuild event channel
    pub events_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            exclude_prefixes: vec![DEFAULT_EXCLUDE_PREFIX.to_string()],
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            allow_write: false,
            rebuild_on_steady_state: true,
            events_capacity: 256,
        }
    }
}

impl Config {
    /// Load configuration from default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file, defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let home = Self::home()?;
        Ok(home.join("config.toml"))
    }

    /// Get the station-index home directory
    pub fn home() -> Result<PathBuf> {
        // Check STATION_INDEX_HOME env var first
        if let Ok(home) = std::env::var("STATION_INDEX_HOME") {
            return Ok(PathBuf::from(home));
        }

        ProjectDirs::from("dev", "station-index", "station-index")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| Error::ConfigError {
                message: "Could not determine station-index home directory".to_string(),
            })
    }
}

/// Internal security-infrastructure subtree, never worth exposing
pub const DEFAULT_EXCLUDE_PREFIX: &str = "/Services/SecurityService/";
