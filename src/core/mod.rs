//! Core primitives used by the completion client.

pub mod primitives;

pub use primitives::{SseDecoder, SseFrame};
