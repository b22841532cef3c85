//! Resume coaching handlers.
//!
//! All coaching state is per-user and served from the coaching store; the
//! interview-question bank is deterministic, so none of these endpoints
//! touch the AI service.

use std::collections::HashMap;

use axum::extract::{Multipart, Query, State};
use axum::Json;
use rescreen_coaching::questions::interview_questions;
use rescreen_models::{
    CoachingQuestions, ProgressResponse, SaveVersionResponse, StudyPackResponse, VersionDiff,
};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{text_from_upload, FormData};
use crate::metrics;
use crate::state::AppState;

/// Save a resume version and report its metrics.
///
/// The job description is optional and may arrive either as a plain
/// `jobDescription` field or as a `job_description` file; an unreadable
/// file is treated as absent rather than rejected.
pub async fn save_version(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> ApiResult<Json<SaveVersionResponse>> {
    let form = FormData::from_multipart(multipart).await?;

    let resume_bytes = form
        .file("resume")
        .ok_or_else(|| ApiError::bad_request("Resume file is required"))?;
    let resume_text = text_from_upload(resume_bytes)
        .ok_or_else(|| ApiError::bad_request("Could not extract text from resume PDF"))?;

    let jd_text = match form.field("jobDescription").map(str::trim) {
        Some(field) if !field.is_empty() => Some(field.to_string()),
        _ => form.file("job_description").and_then(text_from_upload),
    };

    let saved = state
        .coaching
        .save_version(&user.uid, &resume_text, jd_text.as_deref())
        .await?;

    metrics::record_coaching_save();
    info!(uid = %user.uid, version = saved.version, "Coaching version saved");

    Ok(Json(saved))
}

/// List all saved versions with their metrics.
pub async fn progress(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ProgressResponse>> {
    let progress = state.coaching.progress(&user.uid).await?;
    Ok(Json(progress))
}

/// Build a study pack from the latest version's skill gaps.
pub async fn study_pack(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<StudyPackResponse>> {
    let pack = state.coaching.study_pack(&user.uid).await?;
    Ok(Json(pack))
}

/// Deterministic practice questions for a target role.
pub async fn coaching_interview_questions(
    user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<CoachingQuestions>> {
    let target_role = params.get("targetRole").map(String::as_str).unwrap_or("");
    let questions = interview_questions(target_role);

    info!(uid = %user.uid, role = target_role, "Interview questions served");

    Ok(Json(CoachingQuestions { questions }))
}

/// Compare two saved versions.
pub async fn diff(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<VersionDiff>> {
    let parse = |key: &str| params.get(key).and_then(|s| s.parse::<u32>().ok());
    let (prev, curr) = match (parse("prev"), parse("curr")) {
        (Some(prev), Some(curr)) => (prev, curr),
        _ => {
            return Err(ApiError::bad_request(
                "prev and curr query parameters are required",
            ))
        }
    };

    let diff = state.coaching.diff(&user.uid, prev, curr).await?;
    Ok(Json(diff))
}
