//! Coaching store error types.

use thiserror::Error;

/// Result type for coaching operations.
pub type CoachingResult<T> = Result<T, CoachingError>;

/// Errors that can occur in the coaching store.
#[derive(Debug, Error)]
pub enum CoachingError {
    #[error("Version {0} not found")]
    VersionNotFound(u32),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
