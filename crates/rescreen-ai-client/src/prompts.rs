//! Prompt builders for every generation operation.
//!
//! Each builder pins the JSON schema the corresponding response type expects,
//! so contract changes stay next to the client that speaks them.

use rescreen_models::{
    ConversationTurn, EmailRequest, InterviewAnalysisRequest, JobDescriptionRequest,
    MockInterviewRequest, NetworkingMessageRequest, Sender,
};

/// Build the job-seeker analysis prompt.
pub fn job_seeker_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert AI career coach and HR specialist.

Analyze the candidate's resume and job description below and generate a detailed, professional JSON report.

The JSON must include:
- strengths: A detailed list of the candidate's key strengths and skills.
- improvementAreas: A detailed list of areas to improve professionally.
- recommendedRoles: A detailed list of specific job titles or career paths suitable for the candidate.
- generalFeedback: A well-written paragraph summarizing overall feedback and advice tailored to the candidate.

If any data is missing, infer plausible, helpful, and professional content.

Respond ONLY with the JSON object.

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the recruiter analysis prompt.
pub fn recruiter_analysis_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an AI recruitment expert.

Analyze the candidate's resume versus the job description below and provide a detailed professional JSON report including:

- strengths: detailed list of the candidate's main strengths.
- improvementAreas: detailed list of areas for improvement.
- recommendedRoles: relevant job roles for the candidate.
- generalFeedback: a detailed paragraph including a summary and recommendations.

Include professional inferences if information is missing.

Respond ONLY with the JSON object.

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the cover-letter prompt.
pub fn cover_letter_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert career writer.

Write a compelling, professional cover letter for the candidate below, tailored to the job description. Keep it under 400 words, confident in tone, and specific to the role.

Respond ONLY with a JSON object of this shape:
{{"coverLetter": "full cover letter text"}}

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the interview-questions prompt.
pub fn interview_questions_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an experienced technical interviewer.

Based on the resume and job description below, write 8 interview questions the candidate should prepare for: a mix of technical, behavioral, and role-specific questions, numbered.

Respond ONLY with a JSON object of this shape:
{{"questions": "numbered questions as a single text block"}}

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the skill-gap analysis prompt.
pub fn skill_gap_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert career coach.

Compare the candidate's resume against the job description and identify the skills the role requires that the resume does not demonstrate.

Respond ONLY with a JSON object of this shape:
{{"missingSkills": [{{"skill": "name", "importance": "why it matters for this role", "resources": ["https://..."]}}], "advice": "one paragraph of prioritized advice"}}

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the salary-estimate prompt.
pub fn salary_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are a compensation analyst.

Estimate a realistic salary range for the candidate below applying to the given role, and summarize current market trends for that role.

Respond ONLY with a JSON object of this shape:
{{"estimated_salary_range": "e.g. $90,000 - $120,000", "market_trends": "short paragraph", "negotiation_tips": ["tip", "tip"]}}

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the tailor-resume prompt.
pub fn tailor_resume_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"You are an expert resume writer.

Rewrite the candidate's professional summary for the job description below, and rewrite their weakest bullet points to target the role. Keep rewrites truthful to the original content.

Respond ONLY with a JSON object of this shape:
{{"rewritten_summary": "new summary paragraph", "tailored_bullets": [{{"original": "old bullet", "rewritten": "new bullet"}}]}}

Resume:
"""{}"""

Job Description:
"""{}"""
"#,
        resume_text, job_description
    )
}

/// Build the LinkedIn-profile prompt.
pub fn linkedin_profile_prompt(resume_text: &str) -> String {
    format!(
        r#"You are a personal-branding specialist.

From the resume below, write a LinkedIn headline, an About section in first person, and 3-5 experience highlights.

Respond ONLY with a JSON object of this shape:
{{"headline": "120 chars max", "about": "2-3 short paragraphs", "experience_highlights": ["highlight", "highlight"]}}

Resume:
"""{}"""
"#,
        resume_text
    )
}

/// Build the career-path prompt.
pub fn career_path_prompt(resume_text: &str) -> String {
    format!(
        r#"You are a senior career strategist.

From the resume below, assess the candidate's current level and lay out a realistic 3-step career progression with timeframes and the skills to develop at each step.

Respond ONLY with a JSON object of this shape:
{{"currentLevel": "e.g. Mid-level Backend Engineer", "steps": [{{"role": "next role", "timeframe": "e.g. 1-2 years", "skillsToDevelop": ["skill", "skill"]}}]}}

Resume:
"""{}"""
"#,
        resume_text
    )
}

/// Build the resume-health-check prompt.
pub fn resume_health_prompt(resume_text: &str, job_description: Option<&str>) -> String {
    let mut prompt = format!(
        r#"You are a meticulous resume reviewer.

Score the resume below from 0 to 100 for clarity, impact, and completeness, list concrete issues, and suggest fixes.

Respond ONLY with a JSON object of this shape:
{{"score": 0, "issues": ["issue", "issue"], "suggestions": ["fix", "fix"]}}

Resume:
"""{}"""
"#,
        resume_text
    );

    if let Some(jd) = job_description {
        prompt.push_str(&format!(
            r#"
Job Description (score relevance against this role):
"""{}"""
"#,
            jd
        ));
    }

    prompt
}

/// Build the recruiter e-mail prompt.
pub fn email_prompt(request: &EmailRequest) -> String {
    format!(
        r#"You are a recruiting coordinator.

Write a professional "{}" e-mail to candidate {} regarding the {} position. Keep it warm, clear, and under 200 words. Include a subject line.

Respond ONLY with a JSON object of this shape:
{{"email": "Subject: ...\n\nbody"}}
"#,
        request.email_type, request.candidate_name, request.job_title
    )
}

/// Build the mock-interview turn prompt.
pub fn mock_interview_prompt(request: &MockInterviewRequest) -> String {
    format!(
        r#"You are conducting a mock job interview for this role:
"""{}"""

Conversation so far:
{}
Candidate: {}

Reply as the interviewer: react briefly to the candidate's answer, then ask exactly one follow-up question.

Respond ONLY with a JSON object of this shape:
{{"response": "interviewer reply"}}
"#,
        request.job_context,
        render_history(&request.history),
        request.message
    )
}

/// Build the interview-analysis prompt.
pub fn interview_analysis_prompt(request: &InterviewAnalysisRequest) -> String {
    format!(
        r#"You are an interview coach reviewing a finished mock interview for this role:
"""{}"""

Transcript:
{}
Score the candidate's performance from 0 to 100 and give structured feedback.

Respond ONLY with a JSON object of this shape:
{{"score": 0, "feedback": "overall paragraph", "strengths": ["strength"], "improvements": ["improvement"]}}
"#,
        request.job_context,
        render_history(&request.history)
    )
}

/// Build the job-description prompt.
pub fn job_description_prompt(request: &JobDescriptionRequest) -> String {
    format!(
        r#"You are an experienced technical recruiter.

Write a complete job description for the role "{}" requiring these skills: {}. Experience level: {}. Include responsibilities, requirements, and a short company-neutral intro.

Respond ONLY with a JSON object of this shape:
{{"jobDescription": "full job description text"}}
"#,
        request.title, request.skills, request.experience
    )
}

/// Build the boolean-search prompt.
pub fn boolean_search_prompt(job_description: &str) -> String {
    format!(
        r#"You are a sourcing specialist.

From the job description below, build a boolean search string for finding candidates on LinkedIn and job boards. Use AND/OR/NOT, quoted phrases, and parentheses.

Respond ONLY with a JSON object of this shape:
{{"booleanSearch": "the search string"}}

Job Description:
"""{}"""
"#,
        job_description
    )
}

/// Build the networking-message prompt.
pub fn networking_message_prompt(request: &NetworkingMessageRequest) -> String {
    format!(
        r#"You are a networking coach.

Write a short "{}" networking message to {} at {} about the {} role. Keep it personal, specific, and under 120 words.

Respond ONLY with a JSON object of this shape:
{{"message": "the message"}}
"#,
        request.message_type, request.recipient_name, request.company, request.target_role
    )
}

fn render_history(history: &[ConversationTurn]) -> String {
    let mut out = String::new();
    for turn in history {
        let label = match turn.sender {
            Sender::User => "Candidate",
            Sender::Ai => "Interviewer",
        };
        out.push_str(&format!("{}: {}\n", label, turn.text));
    }
    out
}
