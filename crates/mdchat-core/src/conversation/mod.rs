//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Turn types (`Role`, `Turn`)
//! - `model`: The append-only `Conversation`
//!
//! # Usage
//!
//! ```
//! use mdchat_core::conversation::{Conversation, Role, Turn};
//!
//! let mut conversation = Conversation::new();
//! conversation.push(Turn::user("Hi"));
//! assert_eq!(conversation.last().map(|t| t.role), Some(Role::User));
//! ```

mod message;
mod model;

// Re-export public API
pub use message::{Role, Turn};
pub use model::Conversation;
