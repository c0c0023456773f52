// src/prompt/mod.rs
// System prompt assembly from persona, domain and verbosity

pub mod builder;

pub use builder::{build_system_prompt, compose_system_prompt, Detail, TurnSettings, Verbosity};
