//! Backend health probing.

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::ApiClient;

/// Observed backend state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthState {
    /// A probe is in flight and no verdict has been reached.
    Checking,
    /// The backend answered and reported itself healthy.
    Ok { version: String },
    /// The backend is unreachable, unhealthy, or the probe was cancelled.
    Down,
}

impl HealthState {
    pub fn is_ok(&self) -> bool {
        matches!(self, HealthState::Ok { .. })
    }
}

/// Probes `/health` and `/version` and publishes the observed state.
///
/// The two endpoints are hit concurrently. `Ok` requires the health call to
/// succeed with `status == "ok"`; the version text prefers `/version`'s
/// payload and falls back to the version reported by `/health`. Cancelling
/// the token mid-probe resolves to `Down` without waiting out slow calls.
pub struct HealthMonitor {
    state: watch::Sender<HealthState>,
}

impl HealthMonitor {
    pub fn new() -> Self {
        let (state, _) = watch::channel(HealthState::Checking);
        Self { state }
    }

    /// Snapshot of the last published state.
    pub fn state(&self) -> HealthState {
        self.state.borrow().clone()
    }

    /// Observe state transitions.
    pub fn subscribe(&self) -> watch::Receiver<HealthState> {
        self.state.subscribe()
    }

    /// Run one probe and publish the resulting state.
    pub async fn probe(&self, client: &ApiClient, cancel: &CancellationToken) -> HealthState {
        self.state.send_replace(HealthState::Checking);

        let outcome = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Health probe cancelled");
                None
            }
            pair = async { tokio::join!(client.health(), client.version()) } => Some(pair),
        };

        let next = match outcome {
            Some((Ok(health), version)) if health.status == "ok" => {
                let version = match version {
                    Ok(info) => info.version,
                    Err(_) => health.version,
                };
                HealthState::Ok { version }
            }
            _ => HealthState::Down,
        };

        self.state.send_replace(next.clone());
        next
    }
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}
