//! Resume analysis handler.

use axum::extract::{Multipart, State};
use axum::Json;
use rescreen_ai_client::{extract_json_object, prompts, strip_json_fences};
use rescreen_models::report::{lexical_match_percentage, AnalysisReport, AnalyzeMode};
use tracing::info;

use crate::auth::MaybeUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{
    text_from_upload, truncate_chars, FormData, JD_TEXT_LIMIT, RESUME_TEXT_LIMIT,
};
use crate::metrics;
use crate::state::AppState;

/// Analyze a resume in job-seeker or recruiter mode.
///
/// Job-seeker mode takes the job description as a plain `jobDescription`
/// field and tolerates its absence; recruiter mode requires a
/// `job_description` file plus `recruiterEmail` and prepends a lexical
/// match percentage to the feedback.
pub async fn analyze(
    State(state): State<AppState>,
    user: MaybeUser,
    multipart: Multipart,
) -> ApiResult<Json<AnalysisReport>> {
    let form = FormData::from_multipart(multipart).await?;

    let mode = AnalyzeMode::parse(form.field("mode").unwrap_or_default())
        .ok_or_else(|| ApiError::bad_request("Invalid mode; must be 'jobSeeker' or 'recruiter'"))?;

    let resume_bytes = form
        .file("resume")
        .ok_or_else(|| ApiError::bad_request("Resume file is required"))?;
    let resume_text = text_from_upload(resume_bytes)
        .ok_or_else(|| ApiError::bad_request("Could not extract text from resume PDF"))?;
    let resume_text = truncate_chars(&resume_text, RESUME_TEXT_LIMIT);

    let (prompt, match_percentage) = match mode {
        AnalyzeMode::JobSeeker => {
            let job_desc = form.field("jobDescription").unwrap_or_default().trim();
            let job_desc = truncate_chars(job_desc, JD_TEXT_LIMIT);
            let prompt = prompts::job_seeker_analysis_prompt(resume_text, job_desc);
            (prompt, None)
        }
        AnalyzeMode::Recruiter => {
            let recruiter_email = form.field("recruiterEmail").map(str::trim).unwrap_or_default();
            let job_bytes = match form.file("job_description") {
                Some(bytes) if !recruiter_email.is_empty() => bytes,
                _ => {
                    return Err(ApiError::bad_request(
                        "Job description file and recruiterEmail are required for recruiter mode",
                    ))
                }
            };

            let job_text = text_from_upload(job_bytes).ok_or_else(|| {
                ApiError::bad_request("Could not extract text from job description PDF")
            })?;
            let job_text = truncate_chars(&job_text, JD_TEXT_LIMIT);

            let pct = lexical_match_percentage(resume_text, job_text);
            let prompt = prompts::recruiter_analysis_prompt(resume_text, job_text);
            (prompt, Some(pct))
        }
    };

    let raw = match state.ai.generate_text(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            metrics::record_ai_failure("analyze");
            return Err(e.into());
        }
    };

    let mut report = parse_report(&raw);
    report.ensure_defaults();
    if let Some(pct) = match_percentage {
        report.prepend_match_percentage(pct);
    }
    let report = report.finalize();

    let mode_label = match mode {
        AnalyzeMode::JobSeeker => "jobSeeker",
        AnalyzeMode::Recruiter => "recruiter",
    };
    metrics::record_analysis(mode_label);
    info!(
        mode = mode_label,
        authenticated = user.0.is_some(),
        "Analysis completed"
    );

    Ok(Json(report))
}

/// Parse model output into a report. When no JSON object can be recovered,
/// the entire raw response becomes the general feedback.
fn parse_report(raw: &str) -> AnalysisReport {
    let stripped = strip_json_fences(raw);
    extract_json_object(stripped)
        .and_then(|json| serde_json::from_str(json).ok())
        .unwrap_or_else(|| AnalysisReport::from_raw_feedback(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_report_reads_embedded_object() {
        let raw = r#"Here is your report: {"strengths": ["Rust"], "generalFeedback": "solid"}"#;
        let report = parse_report(raw);
        assert_eq!(report.strengths, vec!["Rust".to_string()]);
        assert_eq!(report.general_feedback, "solid");
    }

    #[test]
    fn parse_report_falls_back_to_raw_text() {
        let raw = "The model rambled and returned no JSON at all.";
        let report = parse_report(raw);
        assert!(report.strengths.is_empty());
        assert_eq!(report.general_feedback, raw);
    }
}
