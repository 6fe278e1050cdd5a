//! Application config file storage.
//!
//! Reads `config.toml` into [`AppConfig`]. The file is optional: a missing or
//! blank file yields the defaults.

use crate::paths::MdchatPaths;
use mdchat_core::config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during config storage operations.
#[derive(Debug)]
pub enum ConfigStorageError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML parsing error.
    TomlParseError(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for ConfigStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            ConfigStorageError::TomlParseError(e) => write!(f, "TOML parse error: {}", e),
            ConfigStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for ConfigStorageError {}

impl From<std::io::Error> for ConfigStorageError {
    fn from(e: std::io::Error) -> Self {
        ConfigStorageError::IoError(e)
    }
}

impl From<toml::de::Error> for ConfigStorageError {
    fn from(e: toml::de::Error) -> Self {
        ConfigStorageError::TomlParseError(e)
    }
}

/// Read-only storage for config.toml.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a ConfigStorage with the default path (~/.config/mdchat/config.toml).
    pub fn new() -> Result<Self, ConfigStorageError> {
        let path =
            MdchatPaths::config_file().map_err(|_| ConfigStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a ConfigStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the application config.
    ///
    /// # Returns
    ///
    /// - `Ok(AppConfig)`: parsed config, or defaults if the file is missing or empty
    /// - `Err`: the file exists but could not be read or parsed
    pub fn load(&self) -> Result<AppConfig, ConfigStorageError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "config file missing, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
