//! Chat-completion provider plumbing
//!
//! - `wire`: OpenAI-compatible request and stream-chunk types
//! - `transport`: network seam (reqwest in production)
//! - `completion`: cumulative streaming client
//! - `mock`: scripted transport for tests

pub mod completion;
pub mod mock;
pub mod transport;
pub mod wire;

pub use completion::{CompletionClient, CompletionSettings, GROQ_API_URL, MODEL_NAME};
pub use transport::{ByteStream, HttpTransport, Transport};
pub use wire::{ChatCompletionRequest, ChatStreamChunk};
