//! Typed client SDK for the rescreen API.
//!
//! Everything an application front end needs to talk to the backend:
//! - [`SessionManager`] with injectable token sources (Firebase or dev bypass)
//! - [`ApiClient`] with one validated, typed method per endpoint
//! - [`HealthMonitor`] for cancellable backend probing
//! - [`ConversationLog`] for ordered mock-interview transcripts
//! - [`filter_study_pack`] and [`LatestRequest`] for dashboard plumbing

pub mod api;
pub mod error;
pub mod health;
pub mod interview;
pub mod latest;
pub mod session;
pub mod study;

pub use api::{ApiClient, ApiClientConfig, FilePayload};
pub use error::{ClientError, ClientResult};
pub use health::{HealthMonitor, HealthState};
pub use interview::ConversationLog;
pub use latest::{LatestRequest, Ticket};
pub use session::{
    DevBypassTokenSource, FirebaseConfig, FirebaseTokenSource, SessionManager, TokenSource,
};
pub use study::filter_study_pack;
