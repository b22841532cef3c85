//! Firebase ID token authentication.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Google JWKS URL for Firebase Auth.
const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Firebase token issuer prefix.
const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";

/// JWKS cache TTL.
const JWKS_CACHE_TTL: Duration = Duration::from_secs(3600); // 1 hour

/// Fixed identity used when DEV_BYPASS_AUTH is enabled.
const DEV_UID: &str = "dev-user";
const DEV_EMAIL: &str = "dev@example.com";

const MSG_MISSING_HEADER: &str = "Authorization header missing or malformed";
const MSG_INVALID_TOKEN: &str = "Invalid or expired token";

/// Decoded Firebase ID token claims.
#[derive(Debug, Clone, Deserialize)]
pub struct FirebaseClaims {
    /// User ID
    pub sub: String,
    /// Email (if available)
    pub email: Option<String>,
    /// Issuer
    pub iss: String,
    /// Audience (Firebase project ID)
    pub aud: String,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
}

impl AuthUser {
    /// Fixed identity used when auth bypass is enabled.
    pub fn dev() -> Self {
        Self {
            uid: DEV_UID.to_string(),
            email: Some(DEV_EMAIL.to_string()),
        }
    }
}

impl From<FirebaseClaims> for AuthUser {
    fn from(claims: FirebaseClaims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
        }
    }
}

/// Optional authentication. Requests without an Authorization header are
/// anonymous; a header that fails verification is still rejected.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

/// JWKS response from Google.
#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<JwkKey>,
}

#[derive(Debug, Clone, Deserialize)]
struct JwkKey {
    kid: String,
    n: String,
    e: String,
}

/// Cached JWKS keys, fetched lazily on first verification.
pub struct JwksCache {
    http: Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
    last_refresh: RwLock<Instant>,
    project_id: String,
}

impl JwksCache {
    /// Create a JWKS cache for a Firebase project. No network calls are
    /// made until the first token is verified.
    pub fn new(project_id: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            http,
            keys: RwLock::new(HashMap::new()),
            last_refresh: RwLock::new(Instant::now()),
            project_id: project_id.into(),
        })
    }

    /// Refresh JWKS keys from Google.
    async fn refresh_keys(&self) -> Result<(), Box<dyn std::error::Error>> {
        debug!("Refreshing JWKS keys");

        let response = self.http.get(GOOGLE_JWKS_URL).send().await?;
        let jwks: JwksResponse = response.json().await?;

        let mut keys = HashMap::new();
        for jwk in jwks.keys {
            let key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e)?;
            keys.insert(jwk.kid, key);
        }

        let key_count = keys.len();
        *self.keys.write().await = keys;
        *self.last_refresh.write().await = Instant::now();

        debug!("Refreshed {} JWKS keys", key_count);
        Ok(())
    }

    /// Get decoding key for a key ID.
    async fn get_key(&self, kid: &str) -> Option<DecodingKey> {
        let needs_refresh = {
            let keys = self.keys.read().await;
            let last = self.last_refresh.read().await;
            keys.is_empty() || last.elapsed() > JWKS_CACHE_TTL
        };

        if needs_refresh {
            if let Err(e) = self.refresh_keys().await {
                warn!("Failed to refresh JWKS keys: {}", e);
            }
        }

        self.keys.read().await.get(kid).cloned()
    }

    /// Verify a Firebase ID token. All failure modes collapse to the same
    /// client-facing message; the detail goes to the debug log.
    pub async fn verify_token(&self, token: &str) -> Result<FirebaseClaims, ApiError> {
        let header = decode_header(token).map_err(|e| {
            debug!("Invalid token header: {}", e);
            ApiError::unauthorized(MSG_INVALID_TOKEN)
        })?;

        let kid = header.kid.ok_or_else(|| {
            debug!("Token missing key ID");
            ApiError::unauthorized(MSG_INVALID_TOKEN)
        })?;

        let key = self.get_key(&kid).await.ok_or_else(|| {
            debug!("Unknown key ID: {}", kid);
            ApiError::unauthorized(MSG_INVALID_TOKEN)
        })?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[format!("{}{}", FIREBASE_ISSUER_PREFIX, self.project_id)]);
        validation.set_audience(&[&self.project_id]);

        let token_data = decode::<FirebaseClaims>(token, &key, &validation).map_err(|e| {
            debug!("Token validation failed: {}", e);
            ApiError::unauthorized(MSG_INVALID_TOKEN)
        })?;

        Ok(token_data.claims)
    }
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized(MSG_MISSING_HEADER))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized(MSG_MISSING_HEADER))
}

/// Resolve a bearer token to a user via bypass or JWKS verification.
async fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, ApiError> {
    if token.is_empty() {
        return Err(ApiError::unauthorized(MSG_INVALID_TOKEN));
    }

    if state.config.dev_bypass_auth {
        return Ok(AuthUser::dev());
    }

    match &state.jwks {
        Some(jwks) => {
            let claims = jwks.verify_token(token).await?;
            Ok(AuthUser::from(claims))
        }
        None => {
            warn!("No token verifier configured; rejecting request");
            Err(ApiError::unauthorized(MSG_INVALID_TOKEN))
        }
    }
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        authenticate(token, state).await
    }
}

/// Axum extractor for optional authentication.
#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if parts.headers.get("Authorization").is_none() {
            return Ok(MaybeUser(None));
        }

        let token = bearer_token(parts)?;
        let user = authenticate(token, state).await?;
        Ok(MaybeUser(Some(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_header(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header("Authorization", v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn bearer_token_extracts_value() {
        let parts = parts_with_header(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts).unwrap(), "abc123");
    }

    #[test]
    fn missing_and_malformed_headers_are_rejected() {
        let missing = bearer_token(&parts_with_header(None)).unwrap_err();
        assert_eq!(missing.to_string(), MSG_MISSING_HEADER);

        let malformed = bearer_token(&parts_with_header(Some("Token abc"))).unwrap_err();
        assert_eq!(malformed.to_string(), MSG_MISSING_HEADER);
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_without_network() {
        let cache = JwksCache::new("demo-project").unwrap();
        let err = cache.verify_token("not-a-jwt").await.unwrap_err();
        assert_eq!(err.to_string(), MSG_INVALID_TOKEN);
    }

    #[test]
    fn dev_identity_is_fixed() {
        let user = AuthUser::dev();
        assert_eq!(user.uid, "dev-user");
        assert_eq!(user.email.as_deref(), Some("dev@example.com"));
    }
}
