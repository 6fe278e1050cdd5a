//! Markdown conversation log format.
//!
//! Each turn is one block:
//!
//! ```text
//! ## <Role>
//!
//! <content line 1>
//! <content line 2>
//!
//! ```
//!
//! Blocks are only ever appended, so a document is the concatenation of the
//! blocks of its turns in order. Decoding is lenient: text before the first
//! heading is ignored, unknown role labels read back as `User`, and blocks
//! with no content are dropped.
//!
//! Content lines that would look like a heading are written with one extra
//! leading backslash (`\## Notes`) and unescaped on decode. Trailing empty
//! lines of a turn's content do not survive a round trip; they are
//! indistinguishable from the block separator.
//!
//! Documents written without escaping read back the same way, with one
//! exception: a content line starting with backslashes followed by `## `
//! loses its first backslash.

use mdchat_core::conversation::{Role, Turn};

/// Prefix that marks a heading line carrying a role label.
pub const HEADING_PREFIX: &str = "## ";

const ESCAPE: char = '\\';

/// Renders one turn as a self-delimiting block ready to append to a document.
pub fn encode_turn(role: Role, content: &str) -> String {
    let mut block = String::with_capacity(HEADING_PREFIX.len() + content.len() + 16);
    block.push_str(HEADING_PREFIX);
    block.push_str(role.label());
    block.push_str("\n\n");

    for (index, line) in content.split('\n').enumerate() {
        if index > 0 {
            block.push('\n');
        }
        if is_heading_like(line) {
            block.push(ESCAPE);
        }
        block.push_str(line);
    }

    block.push_str("\n\n");
    block
}

/// Parses a document into its turns, in document order.
pub fn decode_document(text: &str) -> Vec<Turn> {
    let mut turns = Vec::new();
    let mut current_role: Option<Role> = None;
    let mut body: Vec<&str> = Vec::new();

    for line in text.lines() {
        if let Some(label) = line.strip_prefix(HEADING_PREFIX) {
            flush_block(current_role, &body, &mut turns);
            body.clear();
            current_role = Some(Role::from_label(label));
        } else {
            body.push(unescape_line(line));
        }
    }
    flush_block(current_role, &body, &mut turns);

    turns
}

fn flush_block(role: Option<Role>, body: &[&str], turns: &mut Vec<Turn>) {
    let Some(role) = role else {
        // Text before the first heading has no owner.
        return;
    };
    if let Some(content) = block_content(body) {
        turns.push(Turn::new(role, content));
    }
}

/// Strips the separator line after the heading and the trailing padding.
fn block_content(body: &[&str]) -> Option<String> {
    let mut lines = match body.split_first() {
        Some((first, rest)) if first.is_empty() => rest,
        _ => body,
    };
    while let Some((last, rest)) = lines.split_last() {
        if !last.is_empty() {
            break;
        }
        lines = rest;
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn is_heading_like(line: &str) -> bool {
    line.trim_start_matches(ESCAPE).starts_with(HEADING_PREFIX)
}

fn unescape_line(line: &str) -> &str {
    match line.strip_prefix(ESCAPE) {
        Some(rest) if is_heading_like(rest) => rest,
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_block_layout() {
        assert_eq!(encode_turn(Role::User, "Hi"), "## User\n\nHi\n\n");
        assert_eq!(
            encode_turn(Role::Assistant, "a\nb"),
            "## Assistant\n\na\nb\n\n"
        );
    }

    #[test]
    fn test_scenario_three_turns() {
        let doc = [
            encode_turn(Role::User, "Hi"),
            encode_turn(Role::Assistant, "Hello there"),
            encode_turn(Role::User, "Bye"),
        ]
        .concat();

        assert_eq!(
            decode_document(&doc),
            vec![
                Turn::user("Hi"),
                Turn::assistant("Hello there"),
                Turn::user("Bye"),
            ]
        );
    }

    #[test]
    fn test_decode_empty_document() {
        assert!(decode_document("").is_empty());
        assert!(decode_document("\n\n\n").is_empty());
    }

    #[test]
    fn test_unknown_role_is_user() {
        let turns = decode_document("## System\n\nhello\n\n");
        assert_eq!(turns, vec![Turn::user("hello")]);
    }

    #[test]
    fn test_empty_block_is_dropped() {
        let turns = decode_document("## User\n## Assistant\n\nanswer\n\n");
        assert_eq!(turns, vec![Turn::assistant("answer")]);
    }

    #[test]
    fn test_block_with_only_padding_is_dropped() {
        let turns = decode_document("## User\n\n\n\n## Assistant\n\nok\n\n");
        assert_eq!(turns, vec![Turn::assistant("ok")]);
    }

    #[test]
    fn test_interior_blank_lines_preserved() {
        let doc = encode_turn(Role::User, "line1\n\nline3");
        assert_eq!(decode_document(&doc), vec![Turn::user("line1\n\nline3")]);
    }

    #[test]
    fn test_trailing_blank_lines_are_not_preserved() {
        let doc = encode_turn(Role::User, "text\n\n");
        assert_eq!(decode_document(&doc), vec![Turn::user("text")]);
    }

    #[test]
    fn test_leading_blank_line_in_content_preserved() {
        let doc = encode_turn(Role::Assistant, "\nindented start");
        assert_eq!(
            decode_document(&doc),
            vec![Turn::assistant("\nindented start")]
        );
    }

    #[test]
    fn test_content_before_first_heading_is_discarded() {
        let turns = decode_document("# My chat\nnotes\n\n## User\n\nquestion\n\n");
        assert_eq!(turns, vec![Turn::user("question")]);
    }

    #[test]
    fn test_consecutive_same_roles_are_kept() {
        let doc = [
            encode_turn(Role::User, "one"),
            encode_turn(Role::User, "two"),
        ]
        .concat();
        assert_eq!(
            decode_document(&doc),
            vec![Turn::user("one"), Turn::user("two")]
        );
    }

    #[test]
    fn test_heading_label_is_trimmed() {
        let turns = decode_document("##   Assistant  \n\nreply\n");
        assert_eq!(turns, vec![Turn::assistant("reply")]);
    }

    #[test]
    fn test_missing_separator_and_terminator() {
        let turns = decode_document("## Assistant\nno blank line\n## User\nlast line");
        assert_eq!(
            turns,
            vec![Turn::assistant("no blank line"), Turn::user("last line")]
        );
    }

    #[test]
    fn test_crlf_document() {
        let turns = decode_document("## User\r\n\r\nHi\r\nthere\r\n\r\n");
        assert_eq!(turns, vec![Turn::user("Hi\nthere")]);
    }

    #[test]
    fn test_heading_like_content_is_escaped() {
        let content = "Summary:\n## Notes\n\\## already escaped\n# h1 stays";
        let doc = encode_turn(Role::Assistant, content);

        assert!(doc.contains("\n\\## Notes\n"));
        assert!(doc.contains("\n\\\\## already escaped\n"));
        assert!(doc.contains("\n# h1 stays\n"));
        assert_eq!(decode_document(&doc), vec![Turn::assistant(content)]);
    }

    #[test]
    fn test_plain_backslash_lines_untouched() {
        let content = "\\n is a newline\n\\\\server\\share";
        let doc = encode_turn(Role::User, content);
        assert_eq!(doc, format!("## User\n\n{content}\n\n"));
        assert_eq!(decode_document(&doc), vec![Turn::user(content)]);
    }

    #[test]
    fn test_unescaped_document_with_backslash_heading() {
        // Written verbatim, without the extra escape this encoder would add.
        let doc = "## User\n\nraw\n\\## literal\n\\\\## double\n\n";
        assert_eq!(
            decode_document(doc),
            vec![Turn::user("raw\n## literal\n\\## double")]
        );
    }
}
