//! Unified path management for mdchat configuration files.
//!
//! Configuration, secrets and logs are resolved via AppPaths from the
//! version-migrate crate so every platform gets its conventional location.
//! Conversation documents are not stored here; they live in the chats
//! directory from `config.toml` (relative to the working directory by
//! default).

use std::path::PathBuf;
use version_migrate::AppPaths;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for mdchat.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/mdchat/            # Config directory (AppPaths default)
/// ├── config.toml              # Application configuration
/// ├── secret.json              # API keys
/// └── logs/                    # Application logs
///     └── mdchat.log.YYYY-MM-DD
/// ```
pub struct MdchatPaths;

impl MdchatPaths {
    /// Returns a configured AppPaths instance for mdchat.
    fn app_paths() -> AppPaths {
        AppPaths::new("mdchat")
    }

    /// Returns the mdchat configuration directory (e.g. `~/.config/mdchat/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to config.toml.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("secret.json"))
    }

    /// Returns the path to the logs directory.
    pub fn logs_dir() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = MdchatPaths::config_dir().unwrap();
        assert!(config_dir.ends_with("mdchat"));
    }

    #[test]
    fn test_config_file() {
        let config_file = MdchatPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = MdchatPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_secret_file() {
        let secret_file = MdchatPaths::secret_file().unwrap();
        assert!(secret_file.ends_with("secret.json"));
        let config_dir = MdchatPaths::config_dir().unwrap();
        assert!(secret_file.starts_with(&config_dir));
    }

    #[test]
    fn test_logs_dir() {
        let logs_dir = MdchatPaths::logs_dir().unwrap();
        assert!(logs_dir.ends_with("logs"));
        let config_dir = MdchatPaths::config_dir().unwrap();
        assert!(logs_dir.starts_with(&config_dir));
    }
}
