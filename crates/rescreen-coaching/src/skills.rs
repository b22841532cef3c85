//! Skill catalog, extraction, and resume metrics.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex_lite::Regex;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// One recognized skill with its tags and learning resources.
#[derive(Debug, Clone)]
pub struct CatalogSkill {
    pub name: &'static str,
    pub tags: &'static [&'static str],
    pub resources: &'static [&'static str],
}

/// Curated catalog of recognized skills.
///
/// Names are lowercase; multi-word names match as substrings, single-word
/// names match whole tokens only.
pub static SKILL_CATALOG: &[CatalogSkill] = &[
    CatalogSkill {
        name: "python",
        tags: &["language", "backend"],
        resources: &[
            "https://docs.python.org/3/tutorial/",
            "https://realpython.com/",
        ],
    },
    CatalogSkill {
        name: "rust",
        tags: &["language", "systems"],
        resources: &[
            "https://doc.rust-lang.org/book/",
            "https://www.rust-lang.org/learn",
        ],
    },
    CatalogSkill {
        name: "java",
        tags: &["language", "backend"],
        resources: &["https://dev.java/learn/"],
    },
    CatalogSkill {
        name: "javascript",
        tags: &["language", "frontend"],
        resources: &["https://developer.mozilla.org/en-US/docs/Web/JavaScript"],
    },
    CatalogSkill {
        name: "typescript",
        tags: &["language", "frontend"],
        resources: &["https://www.typescriptlang.org/docs/"],
    },
    CatalogSkill {
        name: "react",
        tags: &["frontend", "framework"],
        resources: &["https://react.dev/learn"],
    },
    CatalogSkill {
        name: "sql",
        tags: &["database", "data"],
        resources: &["https://www.postgresql.org/docs/current/tutorial-sql.html"],
    },
    CatalogSkill {
        name: "postgresql",
        tags: &["database"],
        resources: &["https://www.postgresql.org/docs/"],
    },
    CatalogSkill {
        name: "mongodb",
        tags: &["database", "nosql"],
        resources: &["https://www.mongodb.com/docs/manual/tutorial/getting-started/"],
    },
    CatalogSkill {
        name: "redis",
        tags: &["database", "caching"],
        resources: &["https://redis.io/docs/latest/develop/"],
    },
    CatalogSkill {
        name: "docker",
        tags: &["devops", "containers"],
        resources: &["https://docs.docker.com/get-started/"],
    },
    CatalogSkill {
        name: "kubernetes",
        tags: &["devops", "orchestration"],
        resources: &["https://kubernetes.io/docs/tutorials/"],
    },
    CatalogSkill {
        name: "aws",
        tags: &["cloud", "devops"],
        resources: &["https://aws.amazon.com/getting-started/"],
    },
    CatalogSkill {
        name: "terraform",
        tags: &["devops", "infrastructure"],
        resources: &["https://developer.hashicorp.com/terraform/tutorials"],
    },
    CatalogSkill {
        name: "linux",
        tags: &["systems", "devops"],
        resources: &["https://linuxjourney.com/"],
    },
    CatalogSkill {
        name: "git",
        tags: &["tooling", "collaboration"],
        resources: &["https://git-scm.com/book/en/v2"],
    },
    CatalogSkill {
        name: "graphql",
        tags: &["api", "backend"],
        resources: &["https://graphql.org/learn/"],
    },
    CatalogSkill {
        name: "kafka",
        tags: &["streaming", "backend"],
        resources: &["https://kafka.apache.org/documentation/"],
    },
    CatalogSkill {
        name: "machine learning",
        tags: &["data", "ai"],
        resources: &[
            "https://developers.google.com/machine-learning/crash-course",
            "https://www.coursera.org/learn/machine-learning",
        ],
    },
    CatalogSkill {
        name: "tensorflow",
        tags: &["data", "ai"],
        resources: &["https://www.tensorflow.org/tutorials"],
    },
    CatalogSkill {
        name: "pytorch",
        tags: &["data", "ai"],
        resources: &["https://pytorch.org/tutorials/"],
    },
    CatalogSkill {
        name: "agile",
        tags: &["methodology", "collaboration"],
        resources: &["https://www.atlassian.com/agile"],
    },
    CatalogSkill {
        name: "leadership",
        tags: &["soft-skill"],
        resources: &["https://hbr.org/topic/subject/leadership"],
    },
    CatalogSkill {
        name: "communication",
        tags: &["soft-skill"],
        resources: &["https://www.coursera.org/courses?query=communication%20skills"],
    },
];

/// Count `\w+` tokens in the text.
pub fn word_count(text: &str) -> u64 {
    WORD.find_iter(text).count() as u64
}

/// Extract catalog skills present in the text, in catalog order.
pub fn extract_skills(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let tokens: HashSet<&str> = WORD.find_iter(&lower).map(|m| m.as_str()).collect();

    SKILL_CATALOG
        .iter()
        .filter(|skill| {
            if skill.name.contains(' ') {
                lower.contains(skill.name)
            } else {
                tokens.contains(skill.name)
            }
        })
        .map(|skill| skill.name.to_string())
        .collect()
}

/// Look up a catalog entry by name.
pub fn catalog_entry(name: &str) -> Option<&'static CatalogSkill> {
    SKILL_CATALOG.iter().find(|s| s.name == name)
}

/// Share of job-description skills also present in the resume.
///
/// `None` when the job description yields no recognized skills, so callers
/// can distinguish "no data" from zero coverage.
pub fn coverage_ratio(resume_skills: &[String], jd_skills: &[String]) -> Option<f64> {
    if jd_skills.is_empty() {
        return None;
    }

    let resume: HashSet<&str> = resume_skills.iter().map(String::as_str).collect();
    let matched = jd_skills
        .iter()
        .filter(|s| resume.contains(s.as_str()))
        .count();

    Some(matched as f64 / jd_skills.len() as f64)
}
