//! Conversation domain model.

use super::message::Turn;
use serde::{Deserialize, Serialize};

/// An ordered, append-only sequence of turns.
///
/// Insertion order is conversation order. A conversation has no identity of
/// its own; the document that stores it is its key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Creates an empty conversation (a new session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn at the end.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }
}

impl From<Vec<Turn>> for Conversation {
    fn from(turns: Vec<Turn>) -> Self {
        Self { turns }
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.push(Turn::user("Hi"));
        conversation.push(Turn::assistant("Hello there"));
        conversation.push(Turn::user("Bye"));

        let roles: Vec<Role> = conversation.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User]);
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.last().unwrap().content, "Bye");
    }
}
