//! Chat Completions wire types (OpenAI-compatible format)

use serde::{Deserialize, Serialize};

use crate::conversation::Message;

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

// Streaming types

#[derive(Debug, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default)]
    pub choices: Vec<ChatStreamChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatStreamChoice {
    #[serde(default)]
    pub delta: ChatStreamDelta,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatStreamDelta {
    pub content: Option<String>,
}

impl ChatStreamChunk {
    /// Text increment carried by the first choice, if any
    pub fn delta_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .filter(|text| !text.is_empty())
    }
}
