//! Error types for the mdchat application.

use thiserror::Error;

/// Error raised by conversation storage.
///
/// A missing document is not an error (it reads as an empty conversation),
/// so what remains are file system failures.
#[derive(Error, Debug, Clone)]
pub enum ChatError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ChatError {
    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl From<std::io::Error> for ChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, ChatError>`.
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: ChatError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.is_io());
        assert!(err.to_string().contains("PermissionDenied"));
        assert!(err.to_string().contains("denied"));
    }
}
