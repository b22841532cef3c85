//! Application state.

use std::sync::Arc;

use rescreen_ai_client::AiClient;
use rescreen_coaching::store::CoachingStore;
use tracing::warn;

use crate::auth::JwksCache;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub ai: Arc<AiClient>,
    pub coaching: Arc<CoachingStore>,
    /// None when no Firebase project is configured; only the dev bypass can
    /// authenticate in that case.
    pub jwks: Option<Arc<JwksCache>>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let ai = AiClient::from_env()?;
        let coaching = CoachingStore::new(&config.data_dir);

        let jwks = match &config.firebase_project_id {
            Some(project_id) => Some(Arc::new(JwksCache::new(project_id.clone())?)),
            None => {
                if !config.dev_bypass_auth {
                    warn!("FIREBASE_PROJECT_ID not set and dev bypass disabled; authenticated routes will reject all requests");
                }
                None
            }
        };

        Ok(Self {
            config,
            ai: Arc::new(ai),
            coaching: Arc::new(coaching),
            jwks,
        })
    }
}
