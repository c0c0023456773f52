//! Core primitives
//!
//! - **streaming**: SSE decoder for chat-completion streams

pub mod streaming;

pub use streaming::{SseDecoder, SseFrame};
