//! Conversation transcript types.
//!
//! One document maps to exactly one conversation. The transcript is
//! append-only: turns are never edited or removed once pushed.

use serde::{Deserialize, Serialize};

/// Represents the author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnRole {
    /// The human co-authoring the document.
    Operator,
    /// The assisted-writing agent.
    Agent,
}

/// A single turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who authored the turn.
    pub role: TurnRole,
    /// The displayed text of the turn. For operator turns that carried an
    /// attachment this includes the file-reference marker; raw bytes never
    /// enter the transcript.
    pub text: String,
    /// Timestamp when the turn was appended (ISO 8601 format).
    pub timestamp: String,
}

/// An append-only conversation transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an operator turn.
    pub fn push_operator(&mut self, text: impl Into<String>) {
        self.push(TurnRole::Operator, text.into());
    }

    /// Appends an agent turn.
    pub fn push_agent(&mut self, text: impl Into<String>) {
        self.push(TurnRole::Agent, text.into());
    }

    fn push(&mut self, role: TurnRole, text: String) {
        self.turns.push(ConversationTurn {
            role,
            text,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
