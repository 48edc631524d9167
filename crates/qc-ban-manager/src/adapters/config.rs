//! TOML configuration loading (requires "config" feature).

use crate::domain::{BanManagerConfig, DEFAULT_BAN_FILE, DEFAULT_BAN_TIME_SECS};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file structure.
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    ban_manager: BanManagerSection,
}

#[derive(Debug, Deserialize, Default)]
struct BanManagerSection {
    default_ban_time_secs: Option<u64>,
    ban_file: Option<PathBuf>,
}

/// Errors that can occur during config loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read {path}: {error}")]
    Io {
        /// Path of the file that failed to load.
        path: String,
        /// Error message from the I/O operation.
        error: String,
    },
    /// TOML parsing error.
    #[error("Failed to parse config: {0}")]
    Parse(String),
    /// Parsed but unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl BanManagerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [ban_manager]
    /// default_ban_time_secs = 86400
    /// ban_file = "data/banlist.dat"
    /// ```
    ///
    /// Missing keys fall back to defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let section = file.ban_manager;

        let default_ban_time_secs = section
            .default_ban_time_secs
            .unwrap_or(DEFAULT_BAN_TIME_SECS);
        if default_ban_time_secs == 0 {
            return Err(ConfigError::Invalid(
                "default_ban_time_secs must be positive".into(),
            ));
        }

        Ok(Self {
            default_ban_time_secs,
            ban_file: section
                .ban_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_BAN_FILE)),
        })
    }
}
