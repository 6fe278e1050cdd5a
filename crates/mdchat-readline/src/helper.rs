use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

/// Session commands recognised on a line of their own.
pub const EXIT_COMMAND: &str = "exit";

/// CLI helper for rustyline that provides completion, highlighting, and hints
/// for the `exit` command.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: vec![EXIT_COMMAND.to_string()],
        }
    }

    fn matching_command(&self, line: &str) -> Option<&String> {
        if line.len() < 2 {
            return None;
        }
        self.commands.iter().find(|cmd| cmd.starts_with(line))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        let candidates = self
            .matching_command(line)
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .into_iter()
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.commands.iter().any(|cmd| cmd == line) {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        self.matching_command(line)
            .filter(|cmd| cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_command_needs_two_chars() {
        let helper = CliHelper::new();
        assert_eq!(helper.matching_command("e"), None);
        assert_eq!(helper.matching_command("ex").map(String::as_str), Some("exit"));
        assert_eq!(helper.matching_command("exit").map(String::as_str), Some("exit"));
        assert_eq!(helper.matching_command("exits"), None);
        assert_eq!(helper.matching_command("hello"), None);
    }
}
