//! Conversation turn types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The speaker of a turn.
///
/// Documents store the role as free text; anything other than the exact
/// `Assistant` label is read back as `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Message typed by the person at the terminal.
    User,
    /// Reply produced by the completion service.
    Assistant,
}

impl Role {
    /// Label written into document headings.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }

    /// Normalizes a heading label to a role. Unknown labels become `User`.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Assistant" => Role::Assistant,
            _ => Role::User,
        }
    }

    /// Lowercase role name used by chat completion APIs.
    pub fn api_name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One role-tagged message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who produced the message.
    pub role: Role,
    /// Message text, possibly spanning several lines.
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
