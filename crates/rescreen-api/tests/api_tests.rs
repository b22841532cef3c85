//! API integration tests.
//!
//! Each test builds a full router with a scratch data directory and a mock
//! AI service, then drives it through tower's oneshot.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rescreen_ai_client::{AiClient, AiClientConfig};
use rescreen_api::{create_router, ApiConfig, AppState};
use rescreen_coaching::CoachingStore;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// A multipart part: field name, optional filename, value.
struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    value: &'a str,
}

impl<'a> Part<'a> {
    fn field(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            value,
        }
    }

    fn file(name: &'a str, filename: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: Some(filename),
            value,
        }
    }
}

fn multipart_body(parts: &[Part<'_>]) -> String {
    let mut body = String::new();
    for part in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match part.filename {
            Some(filename) => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.name, filename
                ));
                body.push_str("Content-Type: application/octet-stream\r\n");
            }
            None => {
                body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n",
                    part.name
                ));
            }
        }
        body.push_str("\r\n");
        body.push_str(part.value);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));
    body
}

fn multipart_request(uri: &str, token: Option<&str>, parts: &[Part<'_>]) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        );
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(multipart_body(parts))).unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Build a router with dev bypass enabled, a scratch store, and the given
/// AI base URL.
fn test_app(ai_url: &str, data_dir: &Path) -> Router {
    let config = ApiConfig {
        dev_bypass_auth: true,
        data_dir: data_dir.to_path_buf(),
        ..ApiConfig::default()
    };

    let ai = AiClient::new(AiClientConfig {
        base_url: ai_url.to_string(),
        max_retries: 0,
        ..AiClientConfig::default()
    })
    .unwrap();

    let state = AppState {
        config,
        ai: Arc::new(ai),
        coaching: Arc::new(CoachingStore::new(data_dir)),
        jwks: None,
    };

    create_router(state, None)
}

/// Mount a /v1/chat mock whose text payload is the given JSON object.
async fn mock_ai_json(server: &MockServer, payload: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "text": payload.to_string() })),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn health_reports_ok_and_version() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn version_endpoint_reports_version() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app.oneshot(get_request("/version", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert!(response.headers().contains_key("X-Request-ID"));
}

#[tokio::test]
async fn coaching_routes_require_auth() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    for uri in [
        "/coaching/progress",
        "/coaching/study-pack",
        "/coaching/interview-questions",
        "/coaching/diff?prev=1&curr=2",
    ] {
        let response = app
            .clone()
            .oneshot(get_request(uri, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Authorization header missing or malformed");
    }

    // Auth is extracted before the multipart body, so an empty POST suffices.
    let request = Request::builder()
        .method("POST")
        .uri("/coaching/save-version")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_auth_scheme_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = Request::builder()
        .uri("/coaching/progress")
        .header("Authorization", "Token abc")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Authorization header missing or malformed");
}

#[tokio::test]
async fn empty_bearer_token_is_rejected_even_with_bypass() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app
        .oneshot(get_request("/coaching/progress", Some("")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn invalid_token_without_verifier_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();

    // Bypass off and no JWKS configured: nothing can authenticate
    let config = ApiConfig {
        dev_bypass_auth: false,
        data_dir: tmp.path().to_path_buf(),
        ..ApiConfig::default()
    };
    let state = AppState {
        config,
        ai: Arc::new(AiClient::new(AiClientConfig::default()).unwrap()),
        coaching: Arc::new(CoachingStore::new(tmp.path())),
        jwks: None,
    };
    let app = create_router(state, None);

    let response = app
        .oneshot(get_request("/coaching/progress", Some("some-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn analyze_rejects_unknown_mode() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "wizard"),
            Part::file("resume", "resume.txt", "some resume text"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid mode; must be 'jobSeeker' or 'recruiter'");
}

#[tokio::test]
async fn analyze_requires_resume_file() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = multipart_request("/analyze", None, &[Part::field("mode", "jobSeeker")]);

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Resume file is required");
}

#[tokio::test]
async fn analyze_job_seeker_end_to_end() {
    let server = MockServer::start().await;
    mock_ai_json(
        &server,
        serde_json::json!({
            "strengths": ["Ships reliable Rust services"],
            "improvementAreas": ["Speak at meetups"],
            "recommendedRoles": ["Backend Engineer"],
            "generalFeedback": "Strong systems profile. Keep going."
        }),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "jobSeeker"),
            Part::field("jobDescription", "Backend role with Rust and Postgres"),
            Part::file("resume", "resume.txt", "Five years of Rust and Postgres."),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["strengths"][0], "Ships reliable Rust services");
    assert!(json["formattedReport"]
        .as_str()
        .unwrap()
        .starts_with("📈 Detailed Candidate Report"));
    assert!(json["generalFeedback"]
        .as_str()
        .unwrap()
        .contains("Strong systems profile"));
}

#[tokio::test]
async fn analyze_recruiter_requires_jd_and_email() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "recruiter"),
            Part::file("resume", "resume.txt", "some resume text"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Job description file and recruiterEmail are required for recruiter mode"
    );
}

#[tokio::test]
async fn analyze_recruiter_prepends_match_percentage() {
    let server = MockServer::start().await;
    mock_ai_json(
        &server,
        serde_json::json!({ "generalFeedback": "Good overlap with the role." }),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "recruiter"),
            Part::field("recruiterEmail", "hiring@example.com"),
            Part::file("resume", "resume.txt", "rust python sql"),
            Part::file("job_description", "jd.txt", "rust sql docker kubernetes"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let feedback = json["generalFeedback"].as_str().unwrap();
    // 2 of 4 distinct job words appear in the resume; whole percentages
    // keep one decimal place
    assert!(feedback.starts_with("Match Percentage: 50.0%"), "{}", feedback);
    assert!(feedback.contains("Good overlap with the role."));
}

#[tokio::test]
async fn analyze_falls_back_to_raw_feedback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "text": "I could not produce a report today." }),
        ))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "jobSeeker"),
            Part::file("resume", "resume.txt", "some resume text"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["generalFeedback"], "I could not produce a report today.");
    // Defaults still fill the structured fields
    assert_eq!(json["strengths"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn ai_failure_maps_to_service_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = multipart_request(
        "/analyze",
        None,
        &[
            Part::field("mode", "jobSeeker"),
            Part::file("resume", "resume.txt", "some resume text"),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["error"], "AI service error");
}

#[tokio::test]
async fn cover_letter_endpoint_returns_typed_payload() {
    let server = MockServer::start().await;
    mock_ai_json(
        &server,
        serde_json::json!({ "coverLetter": "Dear hiring team, I build backends." }),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = multipart_request(
        "/generate-cover-letter",
        None,
        &[
            Part::field("jobDescription", "Backend role"),
            Part::file("resume", "resume.txt", "Five years of Rust."),
        ],
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["coverLetter"], "Dear hiring team, I build backends.");
}

#[tokio::test]
async fn boolean_search_endpoint_takes_json() {
    let server = MockServer::start().await;
    mock_ai_json(
        &server,
        serde_json::json!({ "booleanSearch": "(\"rust\" OR \"go\") AND backend" }),
    )
    .await;

    let tmp = tempfile::tempdir().unwrap();
    let app = test_app(&server.uri(), tmp.path());

    let request = json_request(
        "/generate-boolean-search",
        serde_json::json!({ "jobDescription": "Backend engineer, Rust or Go" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["booleanSearch"], "(\"rust\" OR \"go\") AND backend");
}

#[tokio::test]
async fn coaching_flow_save_progress_study_pack_diff() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    // First version: covers half the JD skills
    let request = multipart_request(
        "/coaching/save-version",
        Some("dev"),
        &[
            Part::field("jobDescription", "Need python and kubernetes experience"),
            Part::file("resume", "resume.txt", "python developer"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let saved = body_json(response).await;
    assert_eq!(saved["version"], 1);
    assert_eq!(saved["metrics"]["wordCount"], 2);
    assert_eq!(saved["metrics"]["skillCoverageRatio"], 0.5);

    // Second version adds a skill
    let request = multipart_request(
        "/coaching/save-version",
        Some("dev"),
        &[
            Part::field("jobDescription", "Need python and kubernetes experience"),
            Part::file("resume", "resume.txt", "python and kubernetes developer"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    let saved = body_json(response).await;
    assert_eq!(saved["version"], 2);

    // Progress lists both versions in order
    let response = app
        .clone()
        .oneshot(get_request("/coaching/progress", Some("dev")))
        .await
        .unwrap();
    let progress = body_json(response).await;
    let versions = progress["versions"].as_array().unwrap();
    assert_eq!(versions.len(), 2);
    assert_eq!(versions[0]["version"], 1);
    assert_eq!(versions[1]["version"], 2);

    // Latest version has no gaps left, so the study pack is empty
    let response = app
        .clone()
        .oneshot(get_request("/coaching/study-pack", Some("dev")))
        .await
        .unwrap();
    let pack = body_json(response).await;
    assert_eq!(pack["skillGaps"].as_array().unwrap().len(), 0);

    // Diff reports the added skill and word delta
    let response = app
        .clone()
        .oneshot(get_request("/coaching/diff?prev=1&curr=2", Some("dev")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let diff = body_json(response).await;
    assert_eq!(diff["wordCountDelta"], 2);
    assert!(diff["addedSkills"]
        .as_array()
        .unwrap()
        .iter()
        .any(|s| s == "kubernetes"));
}

#[tokio::test]
async fn study_pack_lists_gaps_from_latest_version() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = multipart_request(
        "/coaching/save-version",
        Some("dev"),
        &[
            Part::field("jobDescription", "Need python and kubernetes experience"),
            Part::file("resume", "resume.txt", "python developer"),
        ],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/coaching/study-pack", Some("dev")))
        .await
        .unwrap();
    let pack = body_json(response).await;
    assert_eq!(pack["skillGaps"][0], "kubernetes");
    assert_eq!(pack["studyPack"][0]["skill"], "kubernetes");
    assert!(pack["studyPack"][0]["resources"]
        .as_array()
        .map(|r| !r.is_empty())
        .unwrap_or(false));
}

#[tokio::test]
async fn interview_questions_use_target_role() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app
        .clone()
        .oneshot(get_request(
            "/coaching/interview-questions?targetRole=Data%20Engineer",
            Some("dev"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let questions = json["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 8);
    assert!(questions
        .iter()
        .any(|q| q.as_str().unwrap().contains("Data Engineer")));

    // Blank role falls back to the default
    let response = app
        .oneshot(get_request("/coaching/interview-questions", Some("dev")))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["questions"]
        .as_array()
        .unwrap()
        .iter()
        .any(|q| q.as_str().unwrap().contains("Software Engineer")));
}

#[tokio::test]
async fn diff_requires_both_params() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let response = app
        .clone()
        .oneshot(get_request("/coaching/diff?prev=1", Some("dev")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"], "prev and curr query parameters are required");
}

#[tokio::test]
async fn diff_unknown_version_is_404() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test_app("http://localhost:0", tmp.path());

    let request = multipart_request(
        "/coaching/save-version",
        Some("dev"),
        &[Part::file("resume", "resume.txt", "python developer")],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/coaching/diff?prev=1&curr=9", Some("dev")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Version 9 not found");
}

#[tokio::test]
async fn metrics_endpoint_renders_when_enabled() {
    let tmp = tempfile::tempdir().unwrap();

    let config = ApiConfig {
        dev_bypass_auth: true,
        data_dir: tmp.path().to_path_buf(),
        ..ApiConfig::default()
    };
    let state = AppState {
        config,
        ai: Arc::new(AiClient::new(AiClientConfig::default()).unwrap()),
        coaching: Arc::new(CoachingStore::new(tmp.path())),
        jwks: None,
    };

    // Sole test that installs the global recorder
    let handle = rescreen_api::metrics::init_metrics();
    let app = create_router(state, Some(handle));

    let response = app
        .clone()
        .oneshot(get_request("/health", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/metrics", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
