pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;

// Re-export common types
pub use agent::{CompletionAgent, CompletionError};
pub use conversation::{Conversation, Role, Turn};
pub use error::{ChatError, Result};
