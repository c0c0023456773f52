//! Display layer for the transcript.
//!
//! Decoration is applied on the way out only. Stored messages keep their raw
//! content, which is what gets sent back to the model.

use serde::Serialize;

use super::{Conversation, Role};

pub const USER_AVATAR: &str = "🎮";
pub const ASSISTANT_AVATAR: &str = "🤖";
pub const WELCOME_PLACEHOLDER: &str =
    "👋 Welcome! Ask me anything about gaming strategies, builds, or gameplay tips!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayMessage {
    pub role: Role,
    pub avatar: &'static str,
    pub content: String,
    /// Assistant slot opened but nothing streamed yet
    pub pending: bool,
}

/// Render the transcript for the UI. System entries are never shown.
pub fn render_transcript(conversation: &Conversation) -> Vec<DisplayMessage> {
    conversation
        .messages()
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| DisplayMessage {
            role: m.role,
            avatar: match m.role {
                Role::User => USER_AVATAR,
                _ => ASSISTANT_AVATAR,
            },
            content: m.content.clone(),
            pending: m.role == Role::Assistant && m.content.is_empty(),
        })
        .collect()
}

/// Plain-text line for terminal output
pub fn format_line(message: &DisplayMessage) -> String {
    format!("{} {}", message.avatar, message.content)
}
