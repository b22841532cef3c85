//! Typed client for the rescreen API.
//!
//! One async method per endpoint. Required local inputs are validated before
//! any network activity, file-bearing operations use multipart, the rest use
//! JSON, and every response deserializes into its typed contract.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use rescreen_models::{
    AnalysisReport, BooleanSearch, BooleanSearchRequest, CareerPathPlan, CoachingQuestions,
    CoverLetter, EmailRequest, GeneratedEmail, GeneratedJobDescription, GeneratedQuestions,
    InterviewAnalysis, InterviewAnalysisRequest, JobDescriptionRequest, LinkedInProfile,
    MockInterviewReply, MockInterviewRequest, NetworkingMessage, NetworkingMessageRequest,
    ProgressResponse, ResumeHealthReport, SalaryEstimate, SaveVersionResponse, ServiceHealth,
    SkillGapReport, StudyPackResponse, TailoredResume, VersionDiff, VersionInfo,
};

use crate::error::{ClientError, ClientResult};

/// Configuration for [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL of the rescreen API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    fn part(&self) -> Part {
        Part::bytes(self.bytes.clone()).file_name(self.filename.clone())
    }
}

/// Client for the rescreen API.
pub struct ApiClient {
    http: Client,
    config: ApiClientConfig,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse<T: DeserializeOwned>(label: &str, response: Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            debug!("{} returned {}", label, status);
            return Err(ClientError::status(label, status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::Parse(e.to_string()))
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        label: &str,
        path: &str,
        form: Form,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let builder = self.http.post(self.url(path)).multipart(form);
        let response = Self::auth(builder, token).send().await?;
        Self::parse(label, response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        label: &str,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let builder = self.http.post(self.url(path)).json(body);
        let response = Self::auth(builder, token).send().await?;
        Self::parse(label, response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        label: &str,
        path: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> ClientResult<T> {
        let builder = self.http.get(self.url(path)).query(query);
        let response = Self::auth(builder, token).send().await?;
        Self::parse(label, response).await
    }

    fn require_file(file: &FilePayload, what: &str) -> ClientResult<()> {
        if file.is_empty() {
            return Err(ClientError::validation(format!("{} file is empty", what)));
        }
        Ok(())
    }

    /// Multipart form with the resume and an optional job-description field.
    fn resume_form(resume: &FilePayload, job_description: Option<&str>) -> Form {
        let mut form = Form::new().part("resume", resume.part());
        if let Some(jd) = job_description {
            form = form.text("jobDescription", jd.to_string());
        }
        form
    }

    // --- Status probes ---

    pub async fn health(&self) -> ClientResult<ServiceHealth> {
        self.get("Health check", "/health", &[], None).await
    }

    pub async fn version(&self) -> ClientResult<VersionInfo> {
        self.get("Version check", "/version", &[], None).await
    }

    // --- Analysis ---

    /// Analyze a resume in job-seeker mode.
    pub async fn analyze_job_seeker(
        &self,
        resume: &FilePayload,
        job_description: Option<&str>,
        token: Option<&str>,
    ) -> ClientResult<AnalysisReport> {
        Self::require_file(resume, "Resume")?;

        let form = Self::resume_form(resume, job_description).text("mode", "jobSeeker");
        self.post_multipart("Analyze", "/analyze", form, token).await
    }

    /// Analyze a resume against a job-description file in recruiter mode.
    pub async fn analyze_recruiter(
        &self,
        resume: &FilePayload,
        job_description: &FilePayload,
        recruiter_email: &str,
        token: Option<&str>,
    ) -> ClientResult<AnalysisReport> {
        Self::require_file(resume, "Resume")?;
        Self::require_file(job_description, "Job description")?;
        if recruiter_email.trim().is_empty() {
            return Err(ClientError::validation("Recruiter email is required"));
        }

        let form = Form::new()
            .part("resume", resume.part())
            .part("job_description", job_description.part())
            .text("mode", "recruiter")
            .text("recruiterEmail", recruiter_email.to_string());
        self.post_multipart("Analyze", "/analyze", form, token).await
    }

    // --- Generation: resume + job description ---

    pub async fn generate_cover_letter(
        &self,
        resume: &FilePayload,
        job_description: &str,
        token: Option<&str>,
    ) -> ClientResult<CoverLetter> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, Some(job_description));
        self.post_multipart("Cover letter generation", "/generate-cover-letter", form, token)
            .await
    }

    pub async fn generate_interview_questions(
        &self,
        resume: &FilePayload,
        job_description: &str,
        token: Option<&str>,
    ) -> ClientResult<GeneratedQuestions> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, Some(job_description));
        self.post_multipart(
            "Interview question generation",
            "/generate-interview-questions",
            form,
            token,
        )
        .await
    }

    pub async fn analyze_skills(
        &self,
        resume: &FilePayload,
        job_description: &str,
        token: Option<&str>,
    ) -> ClientResult<SkillGapReport> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, Some(job_description));
        self.post_multipart("Skill analysis", "/analyze-skills", form, token)
            .await
    }

    pub async fn estimate_salary(
        &self,
        resume: &FilePayload,
        job_description: &str,
        token: Option<&str>,
    ) -> ClientResult<SalaryEstimate> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, Some(job_description));
        self.post_multipart("Salary estimate", "/estimate-salary", form, token)
            .await
    }

    pub async fn tailor_resume(
        &self,
        resume: &FilePayload,
        job_description: &str,
        token: Option<&str>,
    ) -> ClientResult<TailoredResume> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, Some(job_description));
        self.post_multipart("Resume tailoring", "/tailor-resume", form, token)
            .await
    }

    pub async fn resume_health_check(
        &self,
        resume: &FilePayload,
        job_description: Option<&str>,
        token: Option<&str>,
    ) -> ClientResult<ResumeHealthReport> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, job_description);
        self.post_multipart("Resume health check", "/resume-health-check", form, token)
            .await
    }

    // --- Generation: resume only ---

    pub async fn generate_linkedin_profile(
        &self,
        resume: &FilePayload,
        token: Option<&str>,
    ) -> ClientResult<LinkedInProfile> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, None);
        self.post_multipart(
            "LinkedIn profile generation",
            "/generate-linkedin-profile",
            form,
            token,
        )
        .await
    }

    pub async fn generate_career_path(
        &self,
        resume: &FilePayload,
        token: Option<&str>,
    ) -> ClientResult<CareerPathPlan> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, None);
        self.post_multipart("Career path generation", "/generate-career-path", form, token)
            .await
    }

    // --- Generation: JSON body ---

    pub async fn generate_email(
        &self,
        request: &EmailRequest,
        token: Option<&str>,
    ) -> ClientResult<GeneratedEmail> {
        self.post_json("Email generation", "/generate-email", request, token)
            .await
    }

    pub async fn mock_interview(
        &self,
        request: &MockInterviewRequest,
        token: Option<&str>,
    ) -> ClientResult<MockInterviewReply> {
        self.post_json("Mock interview", "/mock-interview", request, token)
            .await
    }

    pub async fn analyze_mock_interview(
        &self,
        request: &InterviewAnalysisRequest,
        token: Option<&str>,
    ) -> ClientResult<InterviewAnalysis> {
        self.post_json("Interview analysis", "/analyze-mock-interview", request, token)
            .await
    }

    pub async fn generate_job_description(
        &self,
        request: &JobDescriptionRequest,
        token: Option<&str>,
    ) -> ClientResult<GeneratedJobDescription> {
        self.post_json(
            "Job description generation",
            "/generate-job-description",
            request,
            token,
        )
        .await
    }

    pub async fn generate_boolean_search(
        &self,
        request: &BooleanSearchRequest,
        token: Option<&str>,
    ) -> ClientResult<BooleanSearch> {
        self.post_json(
            "Boolean search generation",
            "/generate-boolean-search",
            request,
            token,
        )
        .await
    }

    pub async fn generate_networking_message(
        &self,
        request: &NetworkingMessageRequest,
        token: Option<&str>,
    ) -> ClientResult<NetworkingMessage> {
        self.post_json(
            "Networking message generation",
            "/generate-networking-message",
            request,
            token,
        )
        .await
    }

    // --- Coaching (token required) ---

    pub async fn save_coaching_version(
        &self,
        resume: &FilePayload,
        job_description: Option<&str>,
        token: &str,
    ) -> ClientResult<SaveVersionResponse> {
        Self::require_file(resume, "Resume")?;
        let form = Self::resume_form(resume, job_description);
        self.post_multipart("Save version", "/coaching/save-version", form, Some(token))
            .await
    }

    pub async fn coaching_progress(&self, token: &str) -> ClientResult<ProgressResponse> {
        self.get("Progress fetch", "/coaching/progress", &[], Some(token))
            .await
    }

    pub async fn coaching_study_pack(&self, token: &str) -> ClientResult<StudyPackResponse> {
        self.get("Study pack fetch", "/coaching/study-pack", &[], Some(token))
            .await
    }

    pub async fn coaching_interview_questions(
        &self,
        target_role: &str,
        token: &str,
    ) -> ClientResult<CoachingQuestions> {
        self.get(
            "Interview questions fetch",
            "/coaching/interview-questions",
            &[("targetRole", target_role.to_string())],
            Some(token),
        )
        .await
    }

    pub async fn coaching_diff(
        &self,
        prev: u32,
        curr: u32,
        token: &str,
    ) -> ClientResult<VersionDiff> {
        self.get(
            "Diff fetch",
            "/coaching/diff",
            &[("prev", prev.to_string()), ("curr", curr.to_string())],
            Some(token),
        )
        .await
    }
}
