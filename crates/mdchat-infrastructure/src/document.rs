//! Conversation documents on disk.
//!
//! A document is read once when a session starts and then only appended to
//! through a single [`ConversationDocument`] handle owned by the session.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mdchat_core::conversation::{Conversation, Role, Turn};
use mdchat_core::error::Result;

use crate::markdown::{decode_document, encode_turn};

/// Loads the conversation stored at `path`.
///
/// # Returns
///
/// - `Ok(Conversation)`: decoded turns; empty if the file does not exist
/// - `Err(ChatError::Io)`: the file exists but could not be read
pub fn load_conversation(path: &Path) -> Result<Conversation> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(
                path = %path.display(),
                "conversation document missing, starting empty"
            );
            return Ok(Conversation::new());
        }
        Err(err) => return Err(err.into()),
    };

    let text = String::from_utf8_lossy(&bytes);
    let turns = decode_document(&text);
    tracing::debug!(path = %path.display(), turns = turns.len(), "decoded conversation document");

    Ok(Conversation::from(turns))
}

/// Append-only handle to one conversation document.
///
/// The file is opened in append mode (and created if needed) and stays open
/// for the lifetime of the handle. Every append is written and flushed before
/// returning, so earlier blocks are never touched again.
#[derive(Debug)]
pub struct ConversationDocument {
    path: PathBuf,
    file: File,
}

impl ConversationDocument {
    /// Opens (or creates) the document at `path` for appending.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        tracing::debug!(path = %path.display(), "opened conversation document for append");
        Ok(Self { path, file })
    }

    /// Appends one encoded turn and flushes it.
    pub fn append(&mut self, role: Role, content: &str) -> Result<()> {
        let block = encode_turn(role, content);
        self.file.write_all(block.as_bytes())?;
        self.file.flush()?;
        tracing::debug!(
            path = %self.path.display(),
            role = %role,
            bytes = block.len(),
            "appended turn"
        );
        Ok(())
    }

    pub fn append_turn(&mut self, turn: &Turn) -> Result<()> {
        self.append(turn.role, &turn.content)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Syncs the file to disk and closes it.
    pub fn close(self) -> Result<()> {
        self.file.sync_all()?;
        tracing::debug!(path = %self.path.display(), "closed conversation document");
        Ok(())
    }
}
