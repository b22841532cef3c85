//! Health and version handlers.

use axum::extract::State;
use axum::Json;
use rescreen_models::status::{ServiceHealth, VersionInfo};

use crate::state::AppState;

/// Health check endpoint (liveness probe).
pub async fn health(State(state): State<AppState>) -> Json<ServiceHealth> {
    Json(ServiceHealth::ok(state.config.app_version.clone()))
}

/// Version endpoint.
pub async fn version(State(state): State<AppState>) -> Json<VersionInfo> {
    Json(VersionInfo {
        version: state.config.app_version.clone(),
    })
}
