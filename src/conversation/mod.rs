//! Conversation state
//!
//! A conversation is an ordered list of role-tagged messages. Insertion order
//! is chronological order is display order. Content is stored raw; avatars
//! and labels live in [`display`] so the API-facing history never needs
//! string surgery.

pub mod display;

use serde::{Deserialize, Serialize};

pub use display::{render_transcript, DisplayMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

/// Ordered transcript owned by exactly one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Start a turn: the user entry followed by an empty assistant slot.
    /// Returns the history that preceded the turn.
    pub fn open_turn(&mut self, user_text: impl Into<String>) -> Vec<Message> {
        let prior = self.messages.clone();
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::assistant(""));
        prior
    }

    /// Overwrite the trailing assistant entry. Returns false (and changes
    /// nothing) if the last entry is not an assistant message.
    pub fn set_trailing_assistant(&mut self, content: impl Into<String>) -> bool {
        match self.messages.last_mut() {
            Some(msg) if msg.role == Role::Assistant => {
                msg.content = content.into();
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl From<Vec<Message>> for Conversation {
    fn from(messages: Vec<Message>) -> Self {
        Self::from_messages(messages)
    }
}
