//! Signed-in identity shared by clients and handlers.

use serde::{Deserialize, Serialize};

/// An authenticated user session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Bearer token attached to API requests.
    pub id_token: String,
}

impl Session {
    pub fn new(uid: impl Into<String>, email: Option<String>, id_token: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email,
            id_token: id_token.into(),
        }
    }

    /// Fixed identity used when auth verification is bypassed in development.
    pub fn dev() -> Self {
        Self {
            uid: "dev-user".to_string(),
            email: Some("dev@example.com".to_string()),
            id_token: "dev".to_string(),
        }
    }
}
