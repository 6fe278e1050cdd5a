//! The directory holding conversation documents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use mdchat_core::error::Result;

use crate::document::ConversationDocument;

/// File extension of conversation documents.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Manages the flat directory of `.md` conversation documents.
///
/// ```text
/// chats/
/// ├── chat_20241225_123456.md
/// └── chat_20241226_090000.md
/// ```
#[derive(Debug, Clone)]
pub struct ChatDirectory {
    root: PathBuf,
}

impl ChatDirectory {
    /// Opens the directory, creating it (and its parents) if absent.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists document file names, sorted ascending.
    ///
    /// Directories, non-`.md` files and names that are not valid UTF-8 are
    /// skipped.
    pub fn list_documents(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }

    /// Returns the path of the document called `name`.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Picks a file name for a conversation started at `timestamp`.
    ///
    /// The base name is `chat_YYYYMMDD_HHMMSS.md`; if that already exists a
    /// numeric suffix is added so an existing document is never reused.
    pub fn new_document_name(&self, timestamp: NaiveDateTime) -> String {
        let stem = document_stem(timestamp);
        let mut name = format!("{stem}.{DOCUMENT_EXTENSION}");
        let mut suffix = 2;
        while self.document_path(&name).exists() {
            name = format!("{stem}_{suffix}.{DOCUMENT_EXTENSION}");
            suffix += 1;
        }
        name
    }

    /// Creates a fresh document named after the current local time.
    pub fn create_document(&self) -> Result<(String, ConversationDocument)> {
        let name = self.new_document_name(Local::now().naive_local());
        let document = ConversationDocument::open(self.document_path(&name))?;
        tracing::info!(document = %name, "created conversation document");
        Ok((name, document))
    }
}

fn document_stem(timestamp: NaiveDateTime) -> String {
    format!("chat_{}", timestamp.format("%Y%m%d_%H%M%S"))
}
