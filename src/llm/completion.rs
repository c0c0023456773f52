//! Streaming chat-completion client.
//!
//! Produces the *cumulative* reply: every item is the whole text received so
//! far, never a delta, because consumers overwrite the assistant slot rather
//! than append to it.

use std::sync::Arc;
use std::time::Duration;

use async_stream::try_stream;
use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::time::timeout;

use super::transport::{HttpTransport, Transport};
use super::wire::{ChatCompletionRequest, ChatStreamChunk};
use crate::config::CoachConfig;
use crate::conversation::{Message, Role};
use crate::core::{SseDecoder, SseFrame};
use crate::error::CoachError;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const MODEL_NAME: &str = "llama-3.3-70b-versatile";
pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ceiling for connecting and for each read of the body
    pub timeout: Duration,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: GROQ_API_URL.into(),
            model: MODEL_NAME.into(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for one completion provider. Cheap to clone.
#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    settings: CompletionSettings,
}

impl CompletionClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        api_key: Option<String>,
        settings: CompletionSettings,
    ) -> Self {
        // Blank keys count as missing
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self {
            transport,
            api_key,
            settings,
        }
    }

    /// HTTP-backed client built from process configuration
    pub fn from_config(config: &CoachConfig) -> Result<Self, CoachError> {
        let settings = config.completion_settings();
        let transport = HttpTransport::new(settings.endpoint.clone(), settings.timeout)?;
        Ok(Self::new(
            Arc::new(transport),
            config.api_key.clone(),
            settings,
        ))
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn settings(&self) -> &CompletionSettings {
        &self.settings
    }

    /// System entry, then prior history, then the new user entry.
    pub fn build_request(
        &self,
        user_message: &str,
        prior_messages: &[Message],
        system_prompt: &str,
    ) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(prior_messages.len() + 2);
        messages.push(Message::system(system_prompt));
        messages.extend(
            prior_messages
                .iter()
                .filter(|m| m.role != Role::System)
                .cloned(),
        );
        messages.push(Message::user(user_message));

        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            stream: true,
        }
    }

    /// Cumulative reply with failures kept typed. The stream ends right
    /// after the first `Err`.
    pub fn try_stream_completion(
        &self,
        user_message: &str,
        prior_messages: &[Message],
        system_prompt: &str,
    ) -> BoxStream<'static, Result<String, CoachError>> {
        let request = self.build_request(user_message, prior_messages, system_prompt);
        cumulative_reply(
            self.transport.clone(),
            self.api_key.clone(),
            request,
            self.settings.timeout,
        )
        .boxed()
    }

    /// Cumulative reply as transcript text. A failure becomes one final
    /// user-facing error string; nothing is retried.
    pub fn stream_completion(
        &self,
        user_message: &str,
        prior_messages: &[Message],
        system_prompt: &str,
    ) -> BoxStream<'static, String> {
        self.try_stream_completion(user_message, prior_messages, system_prompt)
            .map(|item| match item {
                Ok(text) => text,
                Err(e) => {
                    if e.is_transport_failure() {
                        tracing::warn!("Completion failed: {}", e);
                    }
                    e.inline_message()
                }
            })
            .boxed()
    }
}

/// What one decoded frame did to the accumulator
#[derive(Debug, PartialEq, Eq)]
enum FrameOutcome {
    Appended,
    Skipped,
    Done,
}

fn apply_frame(accumulated: &mut String, frame: &SseFrame) -> FrameOutcome {
    if frame.is_done() {
        return FrameOutcome::Done;
    }

    match frame.parse::<ChatStreamChunk>() {
        Ok(chunk) => match chunk.delta_text() {
            Some(text) => {
                accumulated.push_str(text);
                FrameOutcome::Appended
            }
            None => FrameOutcome::Skipped,
        },
        Err(e) => {
            tracing::debug!("Skipping frame: {}", e);
            FrameOutcome::Skipped
        }
    }
}

fn cumulative_reply(
    transport: Arc<dyn Transport>,
    api_key: Option<String>,
    request: ChatCompletionRequest,
    read_timeout: Duration,
) -> impl Stream<Item = Result<String, CoachError>> + Send + 'static {
    try_stream! {
        let api_key = api_key.ok_or(CoachError::CredentialMissing)?;

        tracing::debug!(
            transport = transport.name(),
            messages = request.messages.len(),
            "Opening completion stream"
        );

        let mut body = timeout(read_timeout, transport.open(&api_key, &request))
            .await
            .map_err(|_| CoachError::Connection(format!(
                "no response within {}s",
                read_timeout.as_secs_f32()
            )))??;

        let mut decoder = SseDecoder::new();
        let mut accumulated = String::new();
        let mut frames = 0usize;

        'read: loop {
            let next = timeout(read_timeout, body.next())
                .await
                .map_err(|_| CoachError::Connection(format!(
                    "read timed out after {}s",
                    read_timeout.as_secs_f32()
                )))?;

            let Some(chunk) = next else {
                // Body ended without [DONE]; honor a final unterminated line
                if let Some(frame) = decoder.finish() {
                    if apply_frame(&mut accumulated, &frame) == FrameOutcome::Appended {
                        frames += 1;
                        yield accumulated.clone();
                    }
                }
                break 'read;
            };

            for frame in decoder.push(&chunk?) {
                match apply_frame(&mut accumulated, &frame) {
                    FrameOutcome::Appended => {
                        frames += 1;
                        yield accumulated.clone();
                    }
                    FrameOutcome::Skipped => {}
                    FrameOutcome::Done => break 'read,
                }
            }
        }

        tracing::debug!(frames, chars = accumulated.len(), "Completion stream finished");
    }
}
