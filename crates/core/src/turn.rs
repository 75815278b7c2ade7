//! Conversation turn value objects.
//!
//! A `Turn` is one utterance in a session — either the user's message
//! or the assistant's reply. Turns are immutable once created; session
//! history is an ordered sequence of them.

use serde::{Deserialize, Serialize};

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The end user
    User,
    /// The AI assistant
    Assistant,
}

/// A single turn in a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who sent this turn
    pub role: TurnRole,

    /// The text content
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_turn() {
        let turn = Turn::user("Hello there");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "Hello there");
    }

    #[test]
    fn turn_serialization_roundtrip() {
        let turn = Turn::assistant("Happy to help.");
        let json = serde_json::to_string(&turn).unwrap();
        assert!(json.contains(r#""role":"assistant""#));
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }
}
