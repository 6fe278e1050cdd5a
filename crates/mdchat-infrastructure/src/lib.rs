pub mod chat_directory;
pub mod document;
pub mod markdown;
pub mod paths;
pub mod storage;

pub use crate::chat_directory::ChatDirectory;
pub use crate::document::{ConversationDocument, load_conversation};
pub use crate::paths::MdchatPaths;
