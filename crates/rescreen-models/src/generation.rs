//! Request/response contracts for the generation endpoints.
//!
//! Every endpoint gets its own typed response so malformed payloads surface
//! as parse errors at the client boundary instead of rendering as missing
//! fields. Wire names are camelCase except where noted; the salary, tailor,
//! and LinkedIn payloads keep their historical snake_case fields.

use serde::{Deserialize, Serialize};

use crate::conversation::ConversationTurn;

/// Response from `/generate-cover-letter`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetter {
    pub cover_letter: String,
}

/// Response from `/generate-interview-questions` (a prose block).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestions {
    pub questions: String,
}

/// Response from `/coaching/interview-questions` (a list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingQuestions {
    pub questions: Vec<String>,
}

/// One skill the candidate is missing, from `/analyze-skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingSkill {
    pub skill: String,
    pub importance: String,
    pub resources: Vec<String>,
}

/// Response from `/analyze-skills`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapReport {
    pub missing_skills: Vec<MissingSkill>,
    pub advice: String,
}

/// Response from `/estimate-salary` (snake_case wire fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryEstimate {
    pub estimated_salary_range: String,
    pub market_trends: String,
    pub negotiation_tips: Vec<String>,
}

/// One rewritten resume bullet, from `/tailor-resume`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredBullet {
    pub original: String,
    pub rewritten: String,
}

/// Response from `/tailor-resume` (snake_case wire fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub rewritten_summary: String,
    pub tailored_bullets: Vec<TailoredBullet>,
}

/// Response from `/generate-linkedin-profile` (snake_case wire fields).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub headline: String,
    pub about: String,
    pub experience_highlights: Vec<String>,
}

/// One step of a suggested career path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStep {
    pub role: String,
    pub timeframe: String,
    pub skills_to_develop: Vec<String>,
}

/// Response from `/generate-career-path`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathPlan {
    pub current_level: String,
    pub steps: Vec<CareerStep>,
}

/// Response from `/resume-health-check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeHealthReport {
    pub score: u8,
    pub issues: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Request body for `/generate-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    /// One of `interview_invite`, `rejection`, `offer`.
    #[serde(rename = "type")]
    pub email_type: String,
    pub candidate_name: String,
    pub job_title: String,
}

/// Response from `/generate-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedEmail {
    pub email: String,
}

/// Request body for `/mock-interview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockInterviewRequest {
    pub history: Vec<ConversationTurn>,
    pub message: String,
    pub job_context: String,
}

/// Response from `/mock-interview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockInterviewReply {
    pub response: String,
}

/// Request body for `/analyze-mock-interview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewAnalysisRequest {
    pub history: Vec<ConversationTurn>,
    pub job_context: String,
}

/// Response from `/analyze-mock-interview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewAnalysis {
    pub score: u8,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// Request body for `/generate-job-description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescriptionRequest {
    pub title: String,
    pub skills: String,
    pub experience: String,
}

/// Response from `/generate-job-description`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedJobDescription {
    pub job_description: String,
}

/// Request body for `/generate-boolean-search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanSearchRequest {
    pub job_description: String,
}

/// Response from `/generate-boolean-search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanSearch {
    pub boolean_search: String,
}

/// Request body for `/generate-networking-message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkingMessageRequest {
    pub target_role: String,
    pub company: String,
    pub recipient_name: String,
    pub message_type: String,
}

/// Response from `/generate-networking-message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkingMessage {
    pub message: String,
}
