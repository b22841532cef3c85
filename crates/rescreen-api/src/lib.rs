//! Axum HTTP API server.
//!
//! This crate provides:
//! - Resume analysis and the generation endpoint surface
//! - Coaching endpoints backed by per-user version files
//! - Firebase ID token verification with a dev bypass
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
