//! Client for the external AI text-generation service.
//!
//! The service speaks a small chat-completion contract: `POST /v1/chat` with a
//! model, prompt, and temperature, returning generated text. Model output is
//! treated as untrusted; [`parse`] recovers JSON from fenced or prose-wrapped
//! replies before anything is deserialized.

pub mod client;
pub mod error;
pub mod parse;
pub mod prompts;
pub mod types;

pub use client::{AiClient, AiClientConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use error::{AiError, AiResult};
pub use parse::{extract_json_object, strip_json_fences};
