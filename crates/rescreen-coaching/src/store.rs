//! File-backed coaching version store.
//!
//! One JSON file per user under `<data_dir>/coaching/`, holding the full
//! version history. Writes go to a temp file and are renamed into place.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use rescreen_models::{
    ProgressResponse, SaveVersionResponse, StudyPackEntry, StudyPackResponse, VersionDiff,
    VersionEntry, VersionMetrics,
};

use crate::error::{CoachingError, CoachingResult};
use crate::skills::{catalog_entry, coverage_ratio, extract_skills, word_count};

/// One stored resume version (on-disk format).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredVersion {
    /// 1-based, ascending
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub word_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_coverage_ratio: Option<f64>,
    /// Catalog skills found in the resume
    pub skills: Vec<String>,
    /// Job-description skills the resume lacked
    pub missing_skills: Vec<String>,
}

/// File-backed store of coaching versions.
pub struct CoachingStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl CoachingStore {
    /// Create a store rooted at `<data_dir>/coaching`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            root: data_dir.as_ref().join("coaching"),
            write_lock: Mutex::new(()),
        }
    }

    /// Per-user file path. The uid is sanitized so it cannot escape the root.
    fn user_path(&self, uid: &str) -> PathBuf {
        let safe: String = uid
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", safe))
    }

    async fn load(&self, uid: &str) -> CoachingResult<Vec<StoredVersion>> {
        let path = self.user_path(uid);
        match fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, uid: &str, versions: &[StoredVersion]) -> CoachingResult<()> {
        let path = self.user_path(uid);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Write to a temp file, then rename into place
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(versions)?;
        fs::write(&tmp, &body).await?;
        fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Compute metrics for the resume and append the next version.
    pub async fn save_version(
        &self,
        uid: &str,
        resume_text: &str,
        jd_text: Option<&str>,
    ) -> CoachingResult<SaveVersionResponse> {
        let skills = extract_skills(resume_text);
        let jd_skills = jd_text.map(extract_skills).unwrap_or_default();
        let coverage = coverage_ratio(&skills, &jd_skills);

        let resume_set: HashSet<&str> = skills.iter().map(String::as_str).collect();
        let missing_skills: Vec<String> = jd_skills
            .iter()
            .filter(|s| !resume_set.contains(s.as_str()))
            .cloned()
            .collect();

        let _guard = self.write_lock.lock().await;
        let mut versions = self.load(uid).await?;
        let next = versions.len() as u32 + 1;

        let stored = StoredVersion {
            version: next,
            created_at: Utc::now(),
            word_count: word_count(resume_text),
            skill_coverage_ratio: coverage,
            skills,
            missing_skills,
        };
        let metrics = VersionMetrics {
            word_count: stored.word_count,
            skill_coverage_ratio: stored.skill_coverage_ratio,
        };

        versions.push(stored);
        self.persist(uid, &versions).await?;

        debug!(uid = %uid, version = next, "Saved coaching version");

        Ok(SaveVersionResponse {
            version: next,
            metrics,
        })
    }

    /// All saved versions, ascending by version number.
    pub async fn progress(&self, uid: &str) -> CoachingResult<ProgressResponse> {
        let versions = self.load(uid).await?;
        Ok(ProgressResponse {
            versions: versions
                .into_iter()
                .map(|v| VersionEntry {
                    version: v.version,
                    created_at: v.created_at,
                    metrics: VersionMetrics {
                        word_count: v.word_count,
                        skill_coverage_ratio: v.skill_coverage_ratio,
                    },
                })
                .collect(),
        })
    }

    /// Study pack built from the latest version's missing skills.
    ///
    /// An empty store yields an empty pack rather than an error.
    pub async fn study_pack(&self, uid: &str) -> CoachingResult<StudyPackResponse> {
        let versions = self.load(uid).await?;
        let Some(latest) = versions.last() else {
            return Ok(StudyPackResponse {
                skill_gaps: Vec::new(),
                study_pack: Vec::new(),
            });
        };

        let study_pack = latest
            .missing_skills
            .iter()
            .filter_map(|name| catalog_entry(name))
            .map(|skill| StudyPackEntry {
                skill: skill.name.to_string(),
                tags: skill.tags.iter().map(|t| t.to_string()).collect(),
                resources: skill.resources.iter().map(|r| r.to_string()).collect(),
            })
            .collect();

        Ok(StudyPackResponse {
            skill_gaps: latest.missing_skills.clone(),
            study_pack,
        })
    }

    /// Diff two saved versions by version number.
    pub async fn diff(&self, uid: &str, prev: u32, curr: u32) -> CoachingResult<VersionDiff> {
        let versions = self.load(uid).await?;
        let find = |n: u32| {
            versions
                .iter()
                .find(|v| v.version == n)
                .ok_or(CoachingError::VersionNotFound(n))
        };
        let before = find(prev)?;
        let after = find(curr)?;

        let before_set: HashSet<&str> = before.skills.iter().map(String::as_str).collect();
        let after_set: HashSet<&str> = after.skills.iter().map(String::as_str).collect();
        let added_skills: Vec<String> = after
            .skills
            .iter()
            .filter(|s| !before_set.contains(s.as_str()))
            .cloned()
            .collect();
        let removed_skills: Vec<String> = before
            .skills
            .iter()
            .filter(|s| !after_set.contains(s.as_str()))
            .cloned()
            .collect();

        let skill_coverage_delta = match (before.skill_coverage_ratio, after.skill_coverage_ratio)
        {
            (Some(p), Some(c)) => Some(c - p),
            _ => None,
        };

        Ok(VersionDiff {
            prev,
            curr,
            word_count_delta: after.word_count as i64 - before.word_count as i64,
            skill_coverage_delta,
            added_skills,
            removed_skills,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_versions_are_one_based_and_ascending() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        let first = store.save_version("u1", "rust developer", None).await.unwrap();
        let second = store
            .save_version("u1", "rust and python developer", None)
            .await
            .unwrap();
        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);

        let progress = store.progress("u1").await.unwrap();
        let numbers: Vec<u32> = progress.versions.iter().map(|v| v.version).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_coverage_absent_without_jd() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        let saved = store.save_version("u1", "rust developer", None).await.unwrap();
        assert!(saved.metrics.skill_coverage_ratio.is_none());
        assert_eq!(saved.metrics.word_count, 2);
    }

    #[tokio::test]
    async fn test_coverage_and_study_pack_from_jd() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        let saved = store
            .save_version("u1", "rust services", Some("rust and kubernetes"))
            .await
            .unwrap();
        assert_eq!(saved.metrics.skill_coverage_ratio, Some(0.5));

        let pack = store.study_pack("u1").await.unwrap();
        assert_eq!(pack.skill_gaps, vec!["kubernetes".to_string()]);
        assert_eq!(pack.study_pack.len(), 1);
        assert_eq!(pack.study_pack[0].skill, "kubernetes");
        assert!(!pack.study_pack[0].resources.is_empty());
    }

    #[tokio::test]
    async fn test_study_pack_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        let pack = store.study_pack("nobody").await.unwrap();
        assert!(pack.skill_gaps.is_empty());
        assert!(pack.study_pack.is_empty());
    }

    #[tokio::test]
    async fn test_diff_reports_deltas() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        store.save_version("u1", "rust developer", None).await.unwrap();
        store
            .save_version("u1", "rust and python developer", None)
            .await
            .unwrap();

        let diff = store.diff("u1", 1, 2).await.unwrap();
        assert_eq!(diff.word_count_delta, 2);
        assert_eq!(diff.added_skills, vec!["python".to_string()]);
        assert!(diff.removed_skills.is_empty());
    }

    #[tokio::test]
    async fn test_diff_unknown_version() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        store.save_version("u1", "rust", None).await.unwrap();
        let err = store.diff("u1", 1, 9).await.unwrap_err();
        assert!(matches!(err, CoachingError::VersionNotFound(9)));
    }

    #[tokio::test]
    async fn test_uid_cannot_escape_root() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        store.save_version("../evil", "rust", None).await.unwrap();

        let coaching_dir = dir.path().join("coaching");
        assert!(coaching_dir.join("___evil.json").exists());
        assert!(!dir.path().join("evil.json").exists());
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let dir = TempDir::new().unwrap();
        let store = CoachingStore::new(dir.path());

        store.save_version("alice", "rust", None).await.unwrap();
        let progress = store.progress("bob").await.unwrap();
        assert!(progress.versions.is_empty());
    }
}
