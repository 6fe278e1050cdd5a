//! Terminal line input.
//!
//! Messages span several lines and are sent with a line holding a single
//! space. [`LineReader`] abstracts the terminal so the session loop can be
//! driven by a script in tests.

use anyhow::Result;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::helper::{CliHelper, EXIT_COMMAND};

/// Line that ends a multi-line message.
pub const SEND_TERMINATOR: &str = " ";

/// Outcome of reading one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D or closed stdin
    Eof,
}

pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent>;

    /// Records a line in the input history, if the reader keeps one.
    fn remember(&mut self, _line: &str) {}
}

/// rustyline-backed reader used by the binary.
pub struct EditorReader {
    editor: Editor<CliHelper, DefaultHistory>,
}

impl EditorReader {
    pub fn new() -> Result<Self> {
        let mut editor: Editor<CliHelper, DefaultHistory> = Editor::new()?;
        editor.set_helper(Some(CliHelper::new()));
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadEvent> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadEvent::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadEvent::Eof),
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

/// A complete message entered at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    /// Text to send.
    Message(String),
    /// The `exit` command.
    Exit,
    /// Terminator entered with nothing before it.
    Empty,
    /// Ctrl-C while typing; the partial message is dropped.
    Discarded,
    /// Input closed. Holds whatever was typed before it, if anything.
    Eof(Option<String>),
}

/// Reads lines until the send terminator and classifies the result.
pub fn read_message<R: LineReader>(reader: &mut R) -> Result<MessageInput> {
    let mut lines: Vec<String> = Vec::new();

    loop {
        match reader.read_line("> ")? {
            ReadEvent::Line(line) if line == SEND_TERMINATOR => break,
            ReadEvent::Line(line) => {
                if !line.is_empty() {
                    reader.remember(&line);
                }
                lines.push(line);
            }
            ReadEvent::Interrupted => return Ok(MessageInput::Discarded),
            ReadEvent::Eof => {
                let pending = match classify(lines.join("\n")) {
                    MessageInput::Message(text) => Some(text),
                    _ => None,
                };
                return Ok(MessageInput::Eof(pending));
            }
        }
    }

    Ok(classify(lines.join("\n")))
}

fn classify(text: String) -> MessageInput {
    if text.is_empty() {
        MessageInput::Empty
    } else if text == EXIT_COMMAND {
        MessageInput::Exit
    } else {
        MessageInput::Message(text)
    }
}
