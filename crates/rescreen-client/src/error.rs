//! Client SDK error types.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// A required local input was missing or empty. No request was issued.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the API.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body did not match the operation's contract.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl ClientError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ClientError::Validation(msg.into())
    }

    /// Build the status error for a failed operation.
    pub(crate) fn status(label: &str, status: u16) -> Self {
        ClientError::Status {
            status,
            message: format!("{} failed: {}", label, status),
        }
    }
}
