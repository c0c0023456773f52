// src/lib.rs

pub mod coach;
pub mod config;
pub mod conversation;
pub mod core;
pub mod domain;
pub mod error;
pub mod llm;
pub mod persona;
pub mod prompt;
pub mod server;

pub use coach::{Coach, QuickAction, TurnPhase, TurnSnapshot, TurnStream};
pub use conversation::{Conversation, Message, Role};
pub use error::{CoachError, ConfigurationError};
