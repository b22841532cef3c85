//! Study-pack search filtering.

use rescreen_models::StudyPackEntry;
use url::Url;

/// Filter study-pack entries by a case-insensitive substring query.
///
/// The query is trimmed and matched against each entry's skill name, its
/// joined tags, and the hostnames of its resource URLs. A resource that
/// fails URL parsing is matched as a raw string. An empty query keeps
/// everything.
pub fn filter_study_pack(entries: &[StudyPackEntry], query: &str) -> Vec<StudyPackEntry> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| entry_matches(entry, &query))
        .cloned()
        .collect()
}

fn entry_matches(entry: &StudyPackEntry, query: &str) -> bool {
    if entry.skill.to_lowercase().contains(query) {
        return true;
    }
    if entry.tags.join(" ").to_lowercase().contains(query) {
        return true;
    }
    entry.resources.iter().any(|resource| {
        let haystack = match Url::parse(resource) {
            Ok(url) => url.host_str().map(str::to_string).unwrap_or_default(),
            Err(_) => resource.clone(),
        };
        haystack.to_lowercase().contains(query)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack() -> Vec<StudyPackEntry> {
        vec![
            StudyPackEntry {
                skill: "kubernetes".to_string(),
                tags: vec!["devops".to_string(), "containers".to_string()],
                resources: vec!["https://kubernetes.io/docs/tutorials/".to_string()],
            },
            StudyPackEntry {
                skill: "sql".to_string(),
                tags: vec!["databases".to_string()],
                resources: vec!["https://mode.com/sql-tutorial/".to_string()],
            },
            StudyPackEntry {
                skill: "terraform".to_string(),
                tags: vec!["devops".to_string(), "iac".to_string()],
                resources: vec!["not a url".to_string()],
            },
        ]
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        assert_eq!(filter_study_pack(&pack(), "").len(), 3);
        assert_eq!(filter_study_pack(&pack(), "   ").len(), 3);
    }

    #[test]
    fn test_skill_match_is_case_insensitive() {
        let hits = filter_study_pack(&pack(), "KUBER");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skill, "kubernetes");
    }

    #[test]
    fn test_tag_match() {
        let hits = filter_study_pack(&pack(), "devops");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_hostname_match() {
        let hits = filter_study_pack(&pack(), "mode.com");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skill, "sql");
    }

    #[test]
    fn test_hostname_match_ignores_path() {
        // "tutorial" appears in two resource paths but no hostname or tag
        let hits = filter_study_pack(&pack(), "tutorial");
        assert!(hits.is_empty());
    }

    #[test]
    fn test_unparseable_resource_matches_raw() {
        let hits = filter_study_pack(&pack(), "not a url");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].skill, "terraform");
    }
}
