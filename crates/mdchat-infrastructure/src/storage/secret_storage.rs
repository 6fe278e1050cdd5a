//! Credentials file storage.
//!
//! Reads `secret.json` into [`SecretConfig`]. The file is optional: when it
//! is missing or blank, credentials come from the environment instead. A file
//! that exists but cannot be read or parsed is an error, never a silent
//! fallback.

use crate::paths::MdchatPaths;
use mdchat_core::config::SecretConfig;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Errors that can occur while reading secret.json.
#[derive(Debug)]
pub enum SecretStorageError {
    /// The file exists but could not be read.
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not valid secret.json.
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            SecretStorageError::Parse { path, source } => {
                write!(f, "Invalid JSON in {}: {}", path.display(), source)
            }
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SecretStorageError::Read { source, .. } => Some(source),
            SecretStorageError::Parse { source, .. } => Some(source),
            SecretStorageError::ConfigDirNotFound => None,
        }
    }
}

/// Read-only access to secret.json. Key contents are never logged.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Uses `~/.config/mdchat/secret.json`.
    pub fn new() -> Result<Self, SecretStorageError> {
        let path =
            MdchatPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns `Ok(None)` when there is no file (or only whitespace in it).
    pub fn load(&self) -> Result<Option<SecretConfig>, SecretStorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no secret file");
                return Ok(None);
            }
            Err(source) => {
                return Err(SecretStorageError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| SecretStorageError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(
            &file_path,
            r#"{ "openai": { "api_key": "test-key-123", "model_name": "gpt-4o" } }"#,
        )
        .unwrap();

        let openai = SecretStorage::with_path(file_path)
            .load()
            .unwrap()
            .and_then(|secret| secret.openai)
            .unwrap();

        assert_eq!(openai.api_key, "test-key-123");
        assert_eq!(openai.model_name, Some("gpt-4o".to_string()));
    }

    #[test]
    fn test_blank_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "  \n").unwrap();

        assert!(SecretStorage::with_path(file_path).load().unwrap().is_none());
    }

    #[test]
    fn test_object_without_openai_section() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, "{}").unwrap();

        let secret = SecretStorage::with_path(file_path).load().unwrap().unwrap();
        assert!(secret.openai.is_none());
    }

    #[test]
    fn test_invalid_json_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let err = SecretStorage::with_path(file_path.clone()).load().unwrap_err();
        assert!(matches!(err, SecretStorageError::Parse { ref path, .. } if *path == file_path));
        assert!(err.to_string().contains("secret.json"));
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be cannot be read as text.
        let file_path = temp_dir.path().join("secret.json");
        fs::create_dir(&file_path).unwrap();

        let err = SecretStorage::with_path(file_path).load().unwrap_err();
        assert!(matches!(err, SecretStorageError::Read { .. }));
    }
}
