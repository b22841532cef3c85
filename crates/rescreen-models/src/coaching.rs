//! Coaching dashboard contracts: versions, study packs, diffs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metrics computed for one saved resume version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionMetrics {
    pub word_count: u64,
    /// Share of job-description skills covered by the resume. Absent when
    /// the save carried no job description with recognizable skills.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_coverage_ratio: Option<f64>,
}

/// One saved version as reported by `/coaching/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    /// 1-based, ascending.
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub metrics: VersionMetrics,
}

/// Response from `/coaching/progress`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressResponse {
    pub versions: Vec<VersionEntry>,
}

/// Response from `/coaching/save-version`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveVersionResponse {
    pub version: u32,
    pub metrics: VersionMetrics,
}

/// One study-pack resource group, keyed by skill name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPackEntry {
    pub skill: String,
    pub tags: Vec<String>,
    /// Resource URLs.
    pub resources: Vec<String>,
}

/// Response from `/coaching/study-pack`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPackResponse {
    pub skill_gaps: Vec<String>,
    pub study_pack: Vec<StudyPackEntry>,
}

/// Response from `/coaching/diff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDiff {
    pub prev: u32,
    pub curr: u32,
    pub word_count_delta: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_coverage_delta: Option<f64>,
    pub added_skills: Vec<String>,
    pub removed_skills: Vec<String>,
}
