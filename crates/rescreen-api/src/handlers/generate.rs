//! Generation feature handlers.
//!
//! Every handler builds a prompt, asks the AI collaborator for a typed JSON
//! reply, and returns it verbatim. Resume uploads are multipart; the purely
//! structured features take JSON bodies.

use axum::extract::{Multipart, State};
use axum::Json;
use rescreen_ai_client::prompts;
use rescreen_models::{
    BooleanSearch, BooleanSearchRequest, CareerPathPlan, CoverLetter, EmailRequest,
    GeneratedEmail, GeneratedJobDescription, GeneratedQuestions, InterviewAnalysis,
    InterviewAnalysisRequest, JobDescriptionRequest, LinkedInProfile, MockInterviewReply,
    MockInterviewRequest, NetworkingMessage, NetworkingMessageRequest, ResumeHealthReport,
    SalaryEstimate, SkillGapReport, TailoredResume,
};
use serde::de::DeserializeOwned;

use crate::auth::MaybeUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{
    text_from_upload, truncate_chars, FormData, JD_TEXT_LIMIT, RESUME_TEXT_LIMIT,
};
use crate::metrics;
use crate::state::AppState;

/// Run a typed generation against the AI service, recording feature metrics.
async fn generate<T: DeserializeOwned>(
    state: &AppState,
    feature: &str,
    prompt: &str,
) -> ApiResult<T> {
    match state.ai.generate_json(prompt).await {
        Ok(value) => {
            metrics::record_generation(feature);
            Ok(value)
        }
        Err(e) => {
            metrics::record_ai_failure(feature);
            Err(e.into())
        }
    }
}

/// Extract the required resume text from a parsed form, truncated for
/// prompting.
fn required_resume_text(form: &FormData) -> ApiResult<String> {
    let bytes = form
        .file("resume")
        .ok_or_else(|| ApiError::bad_request("Resume file is required"))?;
    let text = text_from_upload(bytes)
        .ok_or_else(|| ApiError::bad_request("Could not extract text from resume PDF"))?;
    Ok(truncate_chars(&text, RESUME_TEXT_LIMIT).to_string())
}

/// Read the plain-text `jobDescription` field, trimmed and truncated.
fn job_description_text(form: &FormData) -> String {
    let field = form.field("jobDescription").unwrap_or_default().trim();
    truncate_chars(field, JD_TEXT_LIMIT).to_string()
}

/// Parse a multipart form into resume text plus job-description text.
async fn resume_and_job(multipart: Multipart) -> ApiResult<(String, String)> {
    let form = FormData::from_multipart(multipart).await?;
    let resume = required_resume_text(&form)?;
    let job = job_description_text(&form);
    Ok((resume, job))
}

pub async fn generate_cover_letter(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<CoverLetter>> {
    let (resume, job) = resume_and_job(multipart).await?;
    let prompt = prompts::cover_letter_prompt(&resume, &job);
    Ok(Json(generate(&state, "cover_letter", &prompt).await?))
}

pub async fn generate_interview_questions(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<GeneratedQuestions>> {
    let (resume, job) = resume_and_job(multipart).await?;
    let prompt = prompts::interview_questions_prompt(&resume, &job);
    Ok(Json(generate(&state, "interview_questions", &prompt).await?))
}

pub async fn analyze_skills(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<SkillGapReport>> {
    let (resume, job) = resume_and_job(multipart).await?;
    let prompt = prompts::skill_gap_prompt(&resume, &job);
    Ok(Json(generate(&state, "skill_gap", &prompt).await?))
}

pub async fn estimate_salary(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<SalaryEstimate>> {
    let (resume, job) = resume_and_job(multipart).await?;
    let prompt = prompts::salary_prompt(&resume, &job);
    Ok(Json(generate(&state, "salary", &prompt).await?))
}

pub async fn tailor_resume(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<TailoredResume>> {
    let (resume, job) = resume_and_job(multipart).await?;
    let prompt = prompts::tailor_resume_prompt(&resume, &job);
    Ok(Json(generate(&state, "tailor_resume", &prompt).await?))
}

pub async fn generate_linkedin_profile(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<LinkedInProfile>> {
    let form = FormData::from_multipart(multipart).await?;
    let resume = required_resume_text(&form)?;
    let prompt = prompts::linkedin_profile_prompt(&resume);
    Ok(Json(generate(&state, "linkedin_profile", &prompt).await?))
}

pub async fn generate_career_path(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<CareerPathPlan>> {
    let form = FormData::from_multipart(multipart).await?;
    let resume = required_resume_text(&form)?;
    let prompt = prompts::career_path_prompt(&resume);
    Ok(Json(generate(&state, "career_path", &prompt).await?))
}

pub async fn resume_health_check(
    State(state): State<AppState>,
    _user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<ResumeHealthReport>> {
    let form = FormData::from_multipart(multipart).await?;
    let resume = required_resume_text(&form)?;
    let job = job_description_text(&form);
    let job = (!job.is_empty()).then_some(job.as_str());
    let prompt = prompts::resume_health_prompt(&resume, job);
    Ok(Json(generate(&state, "resume_health", &prompt).await?))
}

pub async fn generate_email(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<EmailRequest>,
) -> ApiResult<Json<GeneratedEmail>> {
    let prompt = prompts::email_prompt(&request);
    Ok(Json(generate(&state, "email", &prompt).await?))
}

pub async fn mock_interview(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<MockInterviewRequest>,
) -> ApiResult<Json<MockInterviewReply>> {
    let prompt = prompts::mock_interview_prompt(&request);
    Ok(Json(generate(&state, "mock_interview", &prompt).await?))
}

pub async fn analyze_mock_interview(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<InterviewAnalysisRequest>,
) -> ApiResult<Json<InterviewAnalysis>> {
    let prompt = prompts::interview_analysis_prompt(&request);
    Ok(Json(generate(&state, "interview_analysis", &prompt).await?))
}

pub async fn generate_job_description(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<JobDescriptionRequest>,
) -> ApiResult<Json<GeneratedJobDescription>> {
    let prompt = prompts::job_description_prompt(&request);
    Ok(Json(generate(&state, "job_description", &prompt).await?))
}

pub async fn generate_boolean_search(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<BooleanSearchRequest>,
) -> ApiResult<Json<BooleanSearch>> {
    let prompt = prompts::boolean_search_prompt(&request.job_description);
    Ok(Json(generate(&state, "boolean_search", &prompt).await?))
}

pub async fn generate_networking_message(
    State(state): State<AppState>,
    _user: MaybeUser,
    Json(request): Json<NetworkingMessageRequest>,
) -> ApiResult<Json<NetworkingMessage>> {
    let prompt = prompts::networking_message_prompt(&request);
    Ok(Json(generate(&state, "networking_message", &prompt).await?))
}
