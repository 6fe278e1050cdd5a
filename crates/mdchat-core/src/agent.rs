//! Completion service interface.
//!
//! The session driver only knows this trait; the concrete HTTP agent lives in
//! `mdchat-interaction`.

use async_trait::async_trait;
use thiserror::Error;

use crate::conversation::Turn;

/// Failure returned by a [`CompletionAgent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// The remote service answered with an error or could not be reached.
    #[error("{message}")]
    ProcessError {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
    },

    /// The request could not be built or the response had nothing usable.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),

    #[error("{0}")]
    Other(String),
}

impl CompletionError {
    /// Whether a later attempt with the same history could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ProcessError {
                is_retryable: true,
                ..
            }
        )
    }

    /// HTTP status reported by the service, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ProcessError { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

/// A language-model backend that answers a conversation with one new turn.
///
/// Implementations receive the full ordered history (the last turn is
/// normally the user message just entered) and return a single
/// [`Role::Assistant`](crate::conversation::Role::Assistant) turn.
#[async_trait]
pub trait CompletionAgent: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &str;

    /// Requests the next assistant turn for `history`.
    async fn complete(&self, history: &[Turn]) -> Result<Turn, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_only_for_flagged_process_errors() {
        let retryable = CompletionError::ProcessError {
            status_code: Some(429),
            message: "rate limited".into(),
            is_retryable: true,
        };
        let fatal = CompletionError::ProcessError {
            status_code: Some(401),
            message: "bad key".into(),
            is_retryable: false,
        };

        assert!(retryable.is_retryable());
        assert!(!fatal.is_retryable());
        assert!(!CompletionError::Other("x".into()).is_retryable());
        assert_eq!(fatal.status_code(), Some(401));
        assert_eq!(fatal.to_string(), "bad key");
    }
}
