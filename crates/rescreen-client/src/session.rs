//! Session management with injectable token sources.
//!
//! `SessionManager` is constructed at application root and handed to whatever
//! needs it; there is no global session state. The signed-in session is
//! published on a `watch` channel so consumers observe sign-out and token
//! refresh without polling.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use rescreen_models::Session;

use crate::error::{ClientError, ClientResult};

const IDENTITY_TOOLKIT_URL: &str =
    "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1/token";

/// Refresh the cached token when it is this close to expiry.
const DEFAULT_REFRESH_MARGIN: Duration = Duration::from_secs(300);

/// Provider of authenticated sessions and bearer tokens.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Establish a session with the identity provider.
    async fn sign_in(&self) -> ClientResult<Session>;

    /// Return a currently valid bearer token, refreshing if needed.
    async fn current_token(&self) -> ClientResult<String>;
}

/// Fixed development identity, paired with the server's dev bypass mode.
pub struct DevBypassTokenSource;

#[async_trait]
impl TokenSource for DevBypassTokenSource {
    async fn sign_in(&self) -> ClientResult<Session> {
        Ok(Session::dev())
    }

    async fn current_token(&self) -> ClientResult<String> {
        Ok(Session::dev().id_token)
    }
}

/// Configuration for [`FirebaseTokenSource`].
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project
    pub api_key: String,
    pub email: String,
    pub password: String,
    /// Refresh the token when it is this close to expiry
    pub refresh_margin: Duration,
    /// Request timeout
    pub timeout: Duration,
}

impl FirebaseConfig {
    pub fn new(
        api_key: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            email: email.into(),
            password: password.into(),
            refresh_margin: DEFAULT_REFRESH_MARGIN,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    refresh_token: String,
    /// Seconds until expiry, as a decimal string
    expires_in: String,
    local_id: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

struct CachedToken {
    id_token: String,
    refresh_token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn expires_within(&self, margin: Duration) -> bool {
        self.expires_at.saturating_duration_since(Instant::now()) < margin
    }
}

/// Email/password sign-in against the Firebase REST endpoints.
///
/// The ID token is cached with its expiry; token reads within the refresh
/// margin of expiry exchange the refresh token for a new one. Concurrent
/// refreshes are collapsed by re-checking under the write lock.
pub struct FirebaseTokenSource {
    http: Client,
    config: FirebaseConfig,
    cached: RwLock<Option<CachedToken>>,
}

impl FirebaseTokenSource {
    pub fn new(config: FirebaseConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self {
            http,
            config,
            cached: RwLock::new(None),
        })
    }

    fn parse_expiry(expires_in: &str) -> Instant {
        let secs = expires_in.parse::<u64>().unwrap_or(3600);
        Instant::now() + Duration::from_secs(secs)
    }

    async fn refresh(&self, refresh_token: &str) -> ClientResult<CachedToken> {
        let url = format!("{}?key={}", SECURE_TOKEN_URL, self.config.api_key);
        let response = self
            .http
            .post(&url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::status("Token refresh", status.as_u16()));
        }

        let body: RefreshResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        debug!("Refreshed Firebase ID token");

        Ok(CachedToken {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: Self::parse_expiry(&body.expires_in),
        })
    }
}

#[async_trait]
impl TokenSource for FirebaseTokenSource {
    async fn sign_in(&self) -> ClientResult<Session> {
        let url = format!("{}?key={}", IDENTITY_TOOLKIT_URL, self.config.api_key);
        let response = self
            .http
            .post(&url)
            .json(&serde_json::json!({
                "email": self.config.email,
                "password": self.config.password,
                "returnSecureToken": true,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Firebase sign-in failed with status {}", status);
            return Err(ClientError::status("Sign-in", status.as_u16()));
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(e.to_string()))?;

        let session = Session::new(
            body.local_id.clone(),
            Some(body.email.clone()),
            body.id_token.clone(),
        );

        *self.cached.write().await = Some(CachedToken {
            id_token: body.id_token,
            refresh_token: body.refresh_token,
            expires_at: Self::parse_expiry(&body.expires_in),
        });

        Ok(session)
    }

    async fn current_token(&self) -> ClientResult<String> {
        {
            let cached = self.cached.read().await;
            match cached.as_ref() {
                Some(token) if !token.expires_within(self.config.refresh_margin) => {
                    return Ok(token.id_token.clone());
                }
                Some(_) => {}
                None => return Err(ClientError::validation("Not signed in")),
            }
        }

        // Slow path: another caller may have refreshed while we waited
        let mut cached = self.cached.write().await;
        match cached.as_ref() {
            Some(token) if !token.expires_within(self.config.refresh_margin) => {
                Ok(token.id_token.clone())
            }
            Some(token) => {
                let fresh = self.refresh(&token.refresh_token).await?;
                let id_token = fresh.id_token.clone();
                *cached = Some(fresh);
                Ok(id_token)
            }
            None => Err(ClientError::validation("Not signed in")),
        }
    }
}

/// Owns the signed-in session and publishes changes to subscribers.
pub struct SessionManager {
    source: std::sync::Arc<dyn TokenSource>,
    tx: watch::Sender<Option<Session>>,
}

impl SessionManager {
    pub fn new(source: std::sync::Arc<dyn TokenSource>) -> Self {
        let (tx, _) = watch::channel(None);
        Self { source, tx }
    }

    /// Sign in through the token source. On failure the current session is
    /// left unchanged.
    pub async fn sign_in(&self) -> ClientResult<Session> {
        let session = self.source.sign_in().await?;
        self.tx.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Clear the session unconditionally.
    pub fn sign_out(&self) {
        self.tx.send_replace(None);
    }

    /// Observe session changes, including sign-out and token refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Current bearer token, or `None` when signed out.
    ///
    /// Reads through the token source on every call so refreshed tokens are
    /// picked up; a refresh is republished to subscribers.
    pub async fn bearer_token(&self) -> ClientResult<Option<String>> {
        if self.tx.borrow().is_none() {
            return Ok(None);
        }

        let token = self.source.current_token().await?;
        self.tx.send_if_modified(|current| match current {
            Some(session) if session.id_token != token => {
                session.id_token = token.clone();
                true
            }
            _ => false,
        });

        Ok(Some(token))
    }
}
