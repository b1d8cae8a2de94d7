//! Skill extraction and frequency counting over normalized text.

use std::collections::{BTreeMap, BTreeSet};

use crate::matching::normalizer::{normalize, normalize_with_aliases};
use crate::matching::vocabulary::{boundary_pattern, SkillEntry, Vocabulary};

/// Canonical skills found in one text, ordinal-sorted.
pub type SkillSet = BTreeSet<&'static str>;

/// Occurrence count per skill; only skills seen at least once are present.
pub type SkillFrequency = BTreeMap<String, usize>;

fn padded(text: &str) -> String {
    format!(" {text} ")
}

/// Extracts every vocabulary skill mentioned in `text`, aliases included.
pub fn extract_skills(text: &str) -> SkillSet {
    extract_skills_among(text, Vocabulary::global().entries())
}

/// Extracts skills from `text`, restricted to the given vocabulary entries.
pub fn extract_skills_among<'a, I>(text: &str, candidates: I) -> SkillSet
where
    I: IntoIterator<Item = &'a SkillEntry>,
{
    let haystack = padded(&normalize_with_aliases(text));
    candidates
        .into_iter()
        .filter(|entry| entry.pattern.is_match(&haystack))
        .map(|entry| entry.name)
        .collect()
}

/// Counts non-overlapping boundary matches of each skill. Counting runs on the
/// normalized text without alias expansion, so only literal mentions count.
pub fn skill_frequency<S: AsRef<str>>(text: &str, skills: &[S]) -> SkillFrequency {
    let haystack = padded(&normalize(text));
    let vocabulary = Vocabulary::global();
    let mut frequency = SkillFrequency::new();

    for skill in skills {
        let skill = skill.as_ref();
        let count = match vocabulary.entry(skill) {
            Some(entry) => entry.pattern.find_iter(&haystack).count(),
            None => boundary_pattern(skill).find_iter(&haystack).count(),
        };
        if count > 0 {
            frequency.insert(skill.to_string(), count);
        }
    }
    frequency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::vocabulary::SkillCategory;

    #[test]
    fn test_alias_resolves_to_canonical() {
        assert!(extract_skills("I use js daily").contains("javascript"));
    }

    #[test]
    fn test_java_not_found_inside_javascript() {
        let skills = extract_skills("javascript");
        assert!(skills.contains("javascript"));
        assert!(!skills.contains("java"));
    }

    #[test]
    fn test_symbol_skills_match_as_tokens() {
        let skills = extract_skills("c++ developer");
        assert!(skills.contains("c++"));
        let skills = extract_skills("C++/C#, .NET (Core); Node.js: k8s! cicd");
        for expected in ["c++", "c#", ".net", "node.js", "kubernetes", "ci/cd"] {
            assert!(skills.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_multi_word_skills_need_contiguous_words() {
        assert!(extract_skills("Strong machine learning background").contains("machine learning"));
        assert!(!extract_skills("machine and learning").contains("machine learning"));
    }

    #[test]
    fn test_trailing_period_blocks_match() {
        // "aws." keeps its period through normalization and is not a boundary.
        let skills = extract_skills("Experienced in Python, Django, and AWS. Led a team.");
        assert!(skills.contains("python"));
        assert!(skills.contains("django"));
        assert!(!skills.contains("aws"));
    }

    #[test]
    fn test_alias_adds_both_forms_when_both_are_skills() {
        let skills = extract_skills("Deployed on AWS daily");
        assert!(skills.contains("aws"));
        assert!(skills.contains("amazon web services"));
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let text = "Go, Rust and PostgreSQL; some k8s and ML on GCP.";
        assert_eq!(extract_skills(text), extract_skills(text));
    }

    #[test]
    fn test_extract_among_subset() {
        let vocab = Vocabulary::global();
        let tools: Vec<_> = vocab
            .entries()
            .iter()
            .filter(|e| e.category == SkillCategory::Tools)
            .collect();
        let skills = extract_skills_among("python git jira", tools);
        assert_eq!(skills.into_iter().collect::<Vec<_>>(), vec!["git", "jira"]);
    }

    #[test]
    fn test_empty_text_has_no_skills() {
        assert!(extract_skills("").is_empty());
    }

    #[test]
    fn test_frequency_counts_non_overlapping_matches() {
        let freq = skill_frequency("Python, Django. Python; python python", &["python", "django"]);
        // Adjacent "python python" shares one delimiter, so the second is not counted.
        assert_eq!(freq.get("python"), Some(&3));
        assert_eq!(freq.get("django"), None);
    }

    #[test]
    fn test_frequency_ignores_alias_expansion() {
        let freq = skill_frequency("k8s k8s kubernetes", &["kubernetes"]);
        assert_eq!(freq.get("kubernetes"), Some(&1));
    }

    #[test]
    fn test_frequency_omits_absent_skills() {
        let freq = skill_frequency("rust only", &["rust", "go"]);
        assert_eq!(freq.len(), 1);
        assert_eq!(freq["rust"], 1);
    }
}
