//! Prometheus metrics for the API server.

use axum::body::Body;
use axum::http::{Request, Response};
use axum::middleware::Next;
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

/// Initialize the Prometheus metrics recorder.
/// Returns a handle that can be used to render metrics.
pub fn init_metrics() -> PrometheusHandle {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
}

/// Metric names as constants for consistency.
pub mod names {
    // HTTP metrics
    pub const HTTP_REQUESTS_TOTAL: &str = "rescreen_http_requests_total";
    pub const HTTP_REQUEST_DURATION_SECONDS: &str = "rescreen_http_request_duration_seconds";
    pub const HTTP_REQUESTS_IN_FLIGHT: &str = "rescreen_http_requests_in_flight";

    // Feature metrics
    pub const ANALYSES_TOTAL: &str = "rescreen_analyses_total";
    pub const GENERATIONS_TOTAL: &str = "rescreen_generations_total";
    pub const COACHING_VERSIONS_SAVED_TOTAL: &str = "rescreen_coaching_versions_saved_total";
    pub const AI_FAILURES_TOTAL: &str = "rescreen_ai_failures_total";
}

/// Record an HTTP request. All routes are static paths, so the raw path is
/// a safe label value.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!(names::HTTP_REQUESTS_TOTAL, &labels).increment(1);
    histogram!(names::HTTP_REQUEST_DURATION_SECONDS, &labels).record(duration_secs);
}

/// Record a completed resume analysis.
pub fn record_analysis(mode: &str) {
    let labels = [("mode", mode.to_string())];
    counter!(names::ANALYSES_TOTAL, &labels).increment(1);
}

/// Record a completed generation feature call.
pub fn record_generation(feature: &str) {
    let labels = [("feature", feature.to_string())];
    counter!(names::GENERATIONS_TOTAL, &labels).increment(1);
}

/// Record a saved coaching version.
pub fn record_coaching_save() {
    counter!(names::COACHING_VERSIONS_SAVED_TOTAL).increment(1);
}

/// Record an upstream AI failure.
pub fn record_ai_failure(feature: &str) {
    let labels = [("feature", feature.to_string())];
    counter!(names::AI_FAILURES_TOTAL, &labels).increment(1);
}

/// Metrics middleware for HTTP requests.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response<Body> {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).increment(1.0);

    let response = next.run(request).await;

    gauge!(names::HTTP_REQUESTS_IN_FLIGHT).decrement(1.0);

    let status = response.status().as_u16();
    let duration = start.elapsed().as_secs_f64();

    record_http_request(&method, &path, status, duration);

    response
}
