//! Scripted transport for exercising the client without a network.
//!
//! Each instance replays one fixed script per call and records what it was
//! asked to send.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};

use super::transport::{ByteStream, Transport};
use super::wire::ChatCompletionRequest;
use crate::error::CoachError;

/// One `data:` frame carrying a content delta, blank line included.
pub fn delta_frame(text: &str) -> String {
    let chunk = serde_json::json!({
        "choices": [{ "index": 0, "delta": { "content": text } }]
    });
    format!("data: {}\n\n", chunk)
}

#[derive(Debug, Clone)]
enum Script {
    Chunks(Vec<Bytes>),
    Status { status: u16, body: String },
    FailAfter { chunks: Vec<Bytes>, error: String },
    Stall(Vec<Bytes>),
}

#[derive(Debug)]
pub struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<ChatCompletionRequest>>,
    last_api_key: Mutex<Option<String>>,
}

impl ScriptedTransport {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
            last_api_key: Mutex::new(None),
        }
    }

    /// Raw body chunks, delivered as given
    pub fn chunks<I, C>(chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Bytes>,
    {
        Self::with_script(Script::Chunks(chunks.into_iter().map(Into::into).collect()))
    }

    /// One chunk per delta, then `[DONE]`
    pub fn deltas(deltas: &[&str]) -> Self {
        let mut chunks: Vec<String> = deltas.iter().map(|d| delta_frame(d)).collect();
        chunks.push("data: [DONE]\n\n".to_string());
        Self::chunks(chunks)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::with_script(Script::Status {
            status,
            body: body.into(),
        })
    }

    /// Deliver `chunks`, then fail the connection
    pub fn failing_after<C: Into<Bytes>>(chunks: Vec<C>, error: impl Into<String>) -> Self {
        Self::with_script(Script::FailAfter {
            chunks: chunks.into_iter().map(Into::into).collect(),
            error: error.into(),
        })
    }

    /// Deliver `chunks`, then never send another byte
    pub fn stalled<C: Into<Bytes>>(chunks: Vec<C>) -> Self {
        Self::with_script(Script::Stall(chunks.into_iter().map(Into::into).collect()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<ChatCompletionRequest> {
        self.last_request.lock().ok().and_then(|r| r.clone())
    }

    pub fn last_api_key(&self) -> Option<String> {
        self.last_api_key.lock().ok().and_then(|k| k.clone())
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn open(
        &self,
        api_key: &str,
        request: &ChatCompletionRequest,
    ) -> Result<ByteStream, CoachError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(request.clone());
        }
        if let Ok(mut slot) = self.last_api_key.lock() {
            *slot = Some(api_key.to_string());
        }

        let body: ByteStream = match self.script.clone() {
            Script::Chunks(chunks) => stream::iter(chunks.into_iter().map(Ok)).boxed(),
            Script::Status { status, body } => return Err(CoachError::Status { status, body }),
            Script::FailAfter { chunks, error } => stream::iter(chunks.into_iter().map(Ok))
                .chain(stream::once(async move { Err(CoachError::Connection(error)) }))
                .boxed(),
            Script::Stall(chunks) => stream::iter(chunks.into_iter().map(Ok))
                .chain(stream::pending())
                .boxed(),
        };
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
