//! Set-based match scoring between resume and job-description skills.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::matching::extractor::SkillSet;
use crate::matching::vocabulary::Vocabulary;

/// Output of comparing two skill sets. Lists are in vocabulary casing and
/// ordinal order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// 0.0 – 100.0, one decimal place.
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// `100 * part / whole` rounded half-up to one decimal place.
///
/// Computed in integer tenths so values like 62.5 / 6.25 round the same way
/// on every platform.
pub fn percentage_one_decimal(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let part = part as u128;
    let whole = whole as u128;
    let tenths = (2000 * part + whole) / (2 * whole);
    tenths as f64 / 10.0
}

fn restore_case(skills: BTreeSet<String>) -> Vec<String> {
    let vocabulary = Vocabulary::global();
    let mut restored: Vec<String> = skills
        .into_iter()
        .map(|s| match vocabulary.canonical(&s) {
            Some(canonical) => canonical.to_string(),
            None => s,
        })
        .collect();
    restored.sort();
    restored
}

/// Scores `resume` against `jd`.
///
/// An empty job-description set scores 0.0 and reports every resume skill as
/// extra.
pub fn score_match(resume: &SkillSet, jd: &SkillSet) -> MatchOutcome {
    let resume_lower: BTreeSet<String> = resume.iter().map(|s| s.to_lowercase()).collect();

    if jd.is_empty() {
        return MatchOutcome {
            score: 0.0,
            matched: vec![],
            missing: vec![],
            extra: restore_case(resume_lower),
        };
    }

    let jd_lower: BTreeSet<String> = jd.iter().map(|s| s.to_lowercase()).collect();

    let matched: BTreeSet<String> = resume_lower.intersection(&jd_lower).cloned().collect();
    let missing: BTreeSet<String> = jd_lower.difference(&resume_lower).cloned().collect();
    let extra: BTreeSet<String> = resume_lower.difference(&jd_lower).cloned().collect();

    let score = percentage_one_decimal(matched.len(), jd_lower.len());

    MatchOutcome {
        score,
        matched: restore_case(matched),
        missing: restore_case(missing),
        extra: restore_case(extra),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&'static str]) -> SkillSet {
        items.iter().copied().collect()
    }

    #[test]
    fn test_two_of_three_is_66_7() {
        let outcome = score_match(
            &set(&["python", "django"]),
            &set(&["python", "django", "kubernetes"]),
        );
        assert_eq!(outcome.score, 66.7);
        assert_eq!(outcome.matched, vec!["django", "python"]);
        assert_eq!(outcome.missing, vec!["kubernetes"]);
        assert!(outcome.extra.is_empty());
    }

    #[test]
    fn test_empty_jd_scores_zero_and_everything_is_extra() {
        let outcome = score_match(&set(&["rust", "go"]), &set(&[]));
        assert_eq!(outcome.score, 0.0);
        assert!(outcome.matched.is_empty());
        assert!(outcome.missing.is_empty());
        assert_eq!(outcome.extra, vec!["go", "rust"]);
    }

    #[test]
    fn test_full_and_zero_overlap() {
        assert_eq!(score_match(&set(&["sql"]), &set(&["sql"])).score, 100.0);
        assert_eq!(score_match(&set(&["sql"]), &set(&["java"])).score, 0.0);
    }

    #[test]
    fn test_set_partition_properties() {
        let resume = set(&["python", "docker", "git", "scrum"]);
        let jd = set(&["python", "kubernetes", "git", "aws", "jira"]);
        let outcome = score_match(&resume, &jd);

        let matched: BTreeSet<_> = outcome.matched.iter().map(String::as_str).collect();
        let missing: BTreeSet<_> = outcome.missing.iter().map(String::as_str).collect();
        let extra: BTreeSet<_> = outcome.extra.iter().map(String::as_str).collect();

        assert!(matched.is_disjoint(&missing));
        assert!(matched.is_disjoint(&extra));
        assert_eq!(matched.union(&missing).copied().collect::<BTreeSet<_>>(), jd);
        assert_eq!(matched.union(&extra).copied().collect::<BTreeSet<_>>(), resume);
        assert!(outcome.score >= 0.0 && outcome.score <= 100.0);
        assert_eq!(outcome.score, 40.0);
    }

    #[test]
    fn test_rounding_is_half_up() {
        assert_eq!(percentage_one_decimal(1, 16), 6.3); // 6.25
        assert_eq!(percentage_one_decimal(1, 3), 33.3);
        assert_eq!(percentage_one_decimal(5, 8), 62.5);
        assert_eq!(percentage_one_decimal(1, 7), 14.3); // 14.2857
        assert_eq!(percentage_one_decimal(0, 0), 0.0);
    }

    #[test]
    fn test_outputs_sorted_ordinally() {
        let outcome = score_match(&set(&[]), &set(&["sql", ".net", "c++", "aws"]));
        assert_eq!(outcome.missing, vec![".net", "aws", "c++", "sql"]);
    }
}
