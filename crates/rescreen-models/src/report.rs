//! Candidate analysis report model and shaping.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Analysis mode selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnalyzeMode {
    JobSeeker,
    Recruiter,
}

impl AnalyzeMode {
    /// Parse the wire value of the `mode` form field.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "jobSeeker" => Some(Self::JobSeeker),
            "recruiter" => Some(Self::Recruiter),
            _ => None,
        }
    }
}

/// Candidate analysis report returned by `/analyze`.
///
/// List fields default to empty on deserialization so partial AI payloads
/// still produce a usable report; [`AnalysisReport::ensure_defaults`] fills
/// the gaps before the report is rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvement_areas: Vec<String>,
    #[serde(default)]
    pub recommended_roles: Vec<String>,
    #[serde(default)]
    pub general_feedback: String,
    #[serde(default)]
    pub formatted_report: String,
}

const DEFAULT_STRENGTHS: [&str; 2] = [
    "Strong foundation in relevant skills and knowledge.",
    "Demonstrates eagerness to learn and adapt to new challenges.",
];

const DEFAULT_IMPROVEMENT_AREAS: [&str; 2] = [
    "Continue to develop technical expertise in key areas.",
    "Improve communication and teamwork skills.",
];

const DEFAULT_RECOMMENDED_ROLES: [&str; 2] = ["Software Developer", "Junior Engineer"];

const DEFAULT_GENERAL_FEEDBACK: &str = "Your profile shows promise with a solid skill set. \
     Focus on continuous learning and collaboration to advance your career.";

impl AnalysisReport {
    /// Build a report carrying only raw AI text, for when the AI response
    /// held no parseable JSON object.
    pub fn from_raw_feedback(text: impl Into<String>) -> Self {
        Self {
            strengths: Vec::new(),
            improvement_areas: Vec::new(),
            recommended_roles: Vec::new(),
            general_feedback: text.into(),
            formatted_report: String::new(),
        }
    }

    /// Fill any empty field with its fallback default.
    pub fn ensure_defaults(&mut self) {
        if self.strengths.is_empty() {
            self.strengths = DEFAULT_STRENGTHS.iter().map(|s| s.to_string()).collect();
        }
        if self.improvement_areas.is_empty() {
            self.improvement_areas = DEFAULT_IMPROVEMENT_AREAS
                .iter()
                .map(|s| s.to_string())
                .collect();
        }
        if self.recommended_roles.is_empty() {
            self.recommended_roles = DEFAULT_RECOMMENDED_ROLES
                .iter()
                .map(|s| s.to_string())
                .collect();
        }
        if self.general_feedback.is_empty() {
            self.general_feedback = DEFAULT_GENERAL_FEEDBACK.to_string();
        }
    }

    /// Prepend the recruiter-mode lexical match percentage to the feedback.
    ///
    /// Whole-number percentages render with one decimal place (`50.0%`).
    pub fn prepend_match_percentage(&mut self, percentage: f64) {
        let rendered = if percentage.fract() == 0.0 {
            format!("{:.1}", percentage)
        } else {
            percentage.to_string()
        };
        self.general_feedback = format!(
            "Match Percentage: {}%\n\n{}",
            rendered, self.general_feedback
        );
    }

    /// Render the human-readable report and store it in `formatted_report`.
    pub fn finalize(mut self) -> Self {
        self.formatted_report = self.render();
        self
    }

    fn render(&self) -> String {
        let bullets = |items: &[String]| {
            items
                .iter()
                .map(|s| format!("- {}", s))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "📈 Detailed Candidate Report\n\n\
             🟢 Strengths:\n{}\n\n\
             🟡 Areas to Improve:\n{}\n\n\
             🔵 Recommended Roles:\n{}\n\n\
             📝 General Feedback:\n{}",
            bullets(&self.strengths),
            bullets(&self.improvement_areas),
            bullets(&self.recommended_roles),
            format_general_feedback(&self.general_feedback),
        )
    }
}

static FEEDBACK_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n+|\d+\.\s+|- ").expect("valid regex"));

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Normalize free-form feedback into one bullet per meaningful line.
fn format_general_feedback(feedback: &str) -> String {
    if feedback.is_empty() {
        return "- No feedback provided.".to_string();
    }

    let cleaned: Vec<String> = FEEDBACK_SPLIT
        .split(feedback)
        .map(|piece| piece.trim_matches(&['-', '•', ' ', '\n', '\t'][..]).trim())
        .filter(|piece| !piece.is_empty())
        .map(|piece| format!("- {}", piece))
        .collect();

    if cleaned.is_empty() {
        return "- No feedback provided.".to_string();
    }
    cleaned.join("\n")
}

/// Percentage of job-description words that also appear in the resume,
/// over lowercase word tokens, rounded to two decimals.
pub fn lexical_match_percentage(resume_text: &str, job_text: &str) -> f64 {
    let words = |text: &str| -> HashSet<String> {
        WORD.find_iter(&text.to_lowercase())
            .map(|m| m.as_str().to_string())
            .collect()
    };

    let resume_words = words(resume_text);
    let job_words = words(job_text);
    let common = resume_words.intersection(&job_words).count();
    let pct = common as f64 / job_words.len().max(1) as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}
