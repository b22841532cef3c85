//! File-backed coaching version store.
//!
//! Tracks saved resume versions per user with computed metrics (word count,
//! skill coverage against a job description), builds study packs from skill
//! gaps, and diffs versions. Persistence is one JSON file per user with
//! temp-file-and-rename writes.

pub mod error;
pub mod questions;
pub mod skills;
pub mod store;

pub use error::{CoachingError, CoachingResult};
pub use questions::{interview_questions, DEFAULT_TARGET_ROLE};
pub use skills::{extract_skills, word_count, CatalogSkill, SKILL_CATALOG};
pub use store::CoachingStore;
