//! SSE (Server-Sent Events) decoding for streamed chat completions.
//!
//! Network chunks do not respect line boundaries, so the decoder buffers
//! partial lines and only emits frames for complete `data:` lines.

use serde::de::DeserializeOwned;

use crate::error::CoachError;

/// The sentinel the completion endpoint sends as its final frame.
pub const DONE_SENTINEL: &str = "[DONE]";

/// SSE stream decoder with bounded buffering
///
/// # Example
/// ```ignore
/// let mut decoder = SseDecoder::new();
///
/// while let Some(chunk) = stream.next().await {
///     for frame in decoder.push(&chunk?) {
///         if frame.is_done() { break; }
///         let data: MyType = frame.parse()?;
///     }
/// }
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    /// 1MB. A single unterminated line longer than this is discarded.
    const MAX_BUFFER_SIZE: usize = 1024 * 1024;

    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Push a chunk of bytes and extract every complete frame.
    ///
    /// Bytes are buffered undecoded so a multi-byte UTF-8 character split
    /// across two chunks survives intact.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(frame) = Self::parse_line(&line) {
                frames.push(frame);
            }
        }

        if self.buffer.len() > Self::MAX_BUFFER_SIZE {
            tracing::warn!(
                "SSE line exceeded {}KB without a newline, dropping it",
                Self::MAX_BUFFER_SIZE / 1024
            );
            self.buffer.clear();
        }

        frames
    }

    /// Push a string directly (tests and pre-decoded content)
    pub fn push_str(&mut self, s: &str) -> Vec<SseFrame> {
        self.push(s.as_bytes())
    }

    /// Flush a trailing line that arrived without a final newline.
    pub fn finish(&mut self) -> Option<SseFrame> {
        let line = std::mem::take(&mut self.buffer);
        Self::parse_line(&line)
    }

    pub fn has_remaining(&self) -> bool {
        !self.buffer.is_empty()
    }

    fn parse_line(raw: &[u8]) -> Option<SseFrame> {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim();

        // Blank separators and ":" comments (keep-alives) carry nothing
        if line.is_empty() || line.starts_with(':') {
            return None;
        }

        // event:, id:, retry: are not used by chat completions
        let data = line.strip_prefix("data:")?;
        Some(SseFrame {
            data: data.strip_prefix(' ').unwrap_or(data).to_string(),
        })
    }
}

/// A complete SSE data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseFrame {
    /// Payload without the `data:` prefix
    pub data: String,
}

impl SseFrame {
    pub fn is_done(&self) -> bool {
        self.data.trim() == DONE_SENTINEL
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, CoachError> {
        serde_json::from_str(&self.data)
            .map_err(|e| CoachError::MalformedFrame(format!("{}: {}", e, self.preview())))
    }

    /// First 200 chars of the payload, for logs
    pub fn preview(&self) -> String {
        match self.data.char_indices().nth(200) {
            Some((idx, _)) => format!("{}...", &self.data[..idx]),
            None => self.data.clone(),
        }
    }
}
