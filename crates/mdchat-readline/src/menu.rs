//! Conversation picker shown at startup.

use anyhow::Result;
use colored::Colorize;
use thiserror::Error;

use crate::input::{LineReader, ReadEvent};

/// What the user picked from the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Start a new document.
    New,
    /// Resume the document with this name.
    Existing(String),
}

/// Why a menu answer was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a number.")]
    NotANumber,
    #[error("Please enter one of the listed numbers.")]
    OutOfRange,
}

/// Interprets one menu answer. `0` is a new conversation, `1..=n` the listed
/// documents.
pub fn parse_selection(input: &str, documents: &[String]) -> Result<Selection, SelectionError> {
    let index: usize = input
        .trim()
        .parse()
        .map_err(|_| SelectionError::NotANumber)?;

    match index {
        0 => Ok(Selection::New),
        n if n <= documents.len() => Ok(Selection::Existing(documents[n - 1].clone())),
        _ => Err(SelectionError::OutOfRange),
    }
}

/// Prints the menu and asks until a valid answer is given.
///
/// Returns `None` if input is closed or interrupted before a choice is made.
pub fn prompt_selection<R: LineReader>(
    reader: &mut R,
    documents: &[String],
) -> Result<Option<Selection>> {
    println!("{}", "Select a conversation:".bright_magenta().bold());
    println!("[0] {}", "New conversation".green());
    for (index, name) in documents.iter().enumerate() {
        println!("[{}] {}", index + 1, name);
    }

    loop {
        match reader.read_line("Enter a number > ")? {
            ReadEvent::Line(line) => match parse_selection(&line, documents) {
                Ok(selection) => return Ok(Some(selection)),
                Err(err) => println!("{}", err.to_string().yellow()),
            },
            ReadEvent::Interrupted | ReadEvent::Eof => return Ok(None),
        }
    }
}
