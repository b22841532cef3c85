//! AI service HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AiError, AiResult};
use crate::parse::{extract_json_object, strip_json_fences};
use crate::types::{ChatRequest, ChatResponse, HealthResponse};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "command-light-nightly";
/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.6;

/// Configuration for the AI client.
#[derive(Debug, Clone)]
pub struct AiClientConfig {
    /// Base URL of the AI service
    pub base_url: String,
    /// Model identifier sent with every request
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Request timeout
    pub timeout: Duration,
    /// Max retries
    pub max_retries: u32,
}

impl Default for AiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8100".to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(60),
            max_retries: 2,
        }
    }
}

impl AiClientConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AI_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8100".to_string()),
            model: std::env::var("AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(
                std::env::var("AI_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
            max_retries: std::env::var("AI_SERVICE_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        }
    }
}

/// Client for the external AI text-generation service.
pub struct AiClient {
    http: Client,
    config: AiClientConfig,
}

impl AiClient {
    /// Create a new AI client.
    pub fn new(config: AiClientConfig) -> AiResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(AiError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> AiResult<Self> {
        Self::new(AiClientConfig::from_env())
    }

    /// Check if the AI service is reachable.
    pub async fn health_check(&self) -> AiResult<bool> {
        let url = format!("{}/health", self.config.base_url);

        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                let health: HealthResponse = response.json().await?;
                Ok(health.status == "ok" || health.status == "healthy")
            }
            Ok(response) => {
                warn!("AI service health check failed: {}", response.status());
                Ok(false)
            }
            Err(e) => {
                warn!("AI service health check error: {}", e);
                Ok(false)
            }
        }
    }

    /// Generate free-form text for a prompt.
    pub async fn generate_text(&self, prompt: &str) -> AiResult<String> {
        let url = format!("{}/v1/chat", self.config.base_url);
        let request = ChatRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            temperature: self.config.temperature,
        };

        debug!("Sending generation request to {}", url);

        let response = self
            .with_retry(|| async {
                let response = self
                    .http
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .map_err(AiError::Network)?;

                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await.unwrap_or_default();
                    return Err(AiError::Status {
                        status: status.as_u16(),
                        body,
                    });
                }

                Ok(response)
            })
            .await?;

        let chat: ChatResponse = response.json().await?;
        Ok(chat.text)
    }

    /// Generate and deserialize a typed JSON response.
    ///
    /// Model output is fence-stripped and the outermost JSON object is
    /// extracted from any surrounding prose before deserializing.
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> AiResult<T> {
        let text = self.generate_text(prompt).await?;
        let stripped = strip_json_fences(&text);
        let json = extract_json_object(stripped).ok_or_else(|| {
            AiError::InvalidResponse("no JSON object in model output".to_string())
        })?;
        Ok(serde_json::from_str(json)?)
    }

    /// Execute with retry logic.
    async fn with_retry<F, Fut, T>(&self, operation: F) -> AiResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AiResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    let delay = Duration::from_millis(500 * 2u64.pow(attempt));
                    warn!(
                        "AI request failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| AiError::InvalidResponse("unknown error".to_string())))
    }
}
