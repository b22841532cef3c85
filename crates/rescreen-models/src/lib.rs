//! Shared data models for the rescreen backend and client SDK.
//!
//! This crate provides Serde-serializable types for:
//! - Candidate analysis reports and report shaping
//! - Generation endpoint requests/responses
//! - Coaching versions, study packs, and diffs
//! - Mock-interview conversation turns
//! - Sessions and service status payloads

pub mod coaching;
pub mod conversation;
pub mod generation;
pub mod report;
pub mod session;
pub mod status;

// Re-export common types
pub use coaching::{
    ProgressResponse, SaveVersionResponse, StudyPackEntry, StudyPackResponse, VersionDiff,
    VersionEntry, VersionMetrics,
};
pub use conversation::{ConversationTurn, Sender};
pub use generation::{
    BooleanSearch, BooleanSearchRequest, CareerPathPlan, CareerStep, CoachingQuestions,
    CoverLetter, EmailRequest, GeneratedEmail, GeneratedJobDescription, GeneratedQuestions,
    InterviewAnalysis, InterviewAnalysisRequest, JobDescriptionRequest, LinkedInProfile,
    MissingSkill, MockInterviewReply, MockInterviewRequest, NetworkingMessage,
    NetworkingMessageRequest, ResumeHealthReport, SalaryEstimate, SkillGapReport, TailoredBullet,
    TailoredResume,
};
pub use report::{lexical_match_percentage, AnalysisReport, AnalyzeMode};
pub use session::Session;
pub use status::{ServiceHealth, VersionInfo};
