//! AI service request/response types.

use serde::{Deserialize, Serialize};

/// Request for text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier
    pub model: String,
    /// Full prompt text
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
}

/// Response from text generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text, possibly wrapped in Markdown fences
    pub text: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: Option<String>,
}
