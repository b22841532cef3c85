//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;

use crate::handlers::analyze::analyze;
use crate::handlers::coaching::{
    coaching_interview_questions, diff, progress, save_version, study_pack,
};
use crate::handlers::generate::{
    analyze_mock_interview, analyze_skills, estimate_salary, generate_boolean_search,
    generate_career_path, generate_cover_letter, generate_email, generate_interview_questions,
    generate_job_description, generate_linkedin_profile, generate_networking_message,
    mock_interview, resume_health_check, tailor_resume,
};
use crate::handlers::health::{health, version};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    // Resume analysis
    let analyze_routes = Router::new().route("/analyze", post(analyze));

    // Generation features
    let generation_routes = Router::new()
        .route("/generate-cover-letter", post(generate_cover_letter))
        .route(
            "/generate-interview-questions",
            post(generate_interview_questions),
        )
        .route("/analyze-skills", post(analyze_skills))
        .route("/estimate-salary", post(estimate_salary))
        .route("/tailor-resume", post(tailor_resume))
        .route("/generate-linkedin-profile", post(generate_linkedin_profile))
        .route("/generate-career-path", post(generate_career_path))
        .route("/resume-health-check", post(resume_health_check))
        .route("/generate-email", post(generate_email))
        .route("/mock-interview", post(mock_interview))
        .route("/analyze-mock-interview", post(analyze_mock_interview))
        .route(
            "/generate-job-description",
            post(generate_job_description),
        )
        .route("/generate-boolean-search", post(generate_boolean_search))
        .route(
            "/generate-networking-message",
            post(generate_networking_message),
        );

    // Coaching (authenticated, per-user state)
    let coaching_routes = Router::new()
        .route("/coaching/save-version", post(save_version))
        .route("/coaching/progress", get(progress))
        .route("/coaching/study-pack", get(study_pack))
        .route(
            "/coaching/interview-questions",
            get(coaching_interview_questions),
        )
        .route("/coaching/diff", get(diff));

    let health_routes = Router::new()
        .route("/health", get(health))
        .route("/version", get(version));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(analyze_routes)
        .merge(generation_routes)
        .merge(coaching_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        // Multipart reads are capped at 2MB by axum unless raised explicitly
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TimeoutLayer::new(state.config.request_timeout))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
