//! Metadata detectors: experience level, years required, education buckets.
//!
//! All three scan the lowercased raw text with plain substring / regex search.
//! They never see the alias-expanded form and never consult the vocabulary.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Experience level
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[serde(rename = "entry")]
    Entry,
    #[serde(rename = "mid")]
    Mid,
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "not specified")]
    NotSpecified,
}

impl ExperienceLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::NotSpecified => "not specified",
        }
    }
}

const ENTRY_KEYWORDS: &[&str] = &[
    "entry level", "junior", "associate", "intern", "internship",
    "fresher", "graduate", "0-1 years", "0-2 years", "beginner",
];

const MID_KEYWORDS: &[&str] = &[
    "mid level", "mid-level", "intermediate", "2-4 years", "3-5 years",
    "2+ years", "3+ years", "4+ years",
];

const SENIOR_KEYWORDS: &[&str] = &[
    "senior", "lead", "principal", "staff", "architect",
    "5+ years", "6+ years", "7+ years", "8+ years", "10+ years",
    "expert", "advanced",
];

fn mentions_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Highest detected level wins: senior over mid over entry.
pub fn detect_experience_level(text: &str) -> ExperienceLevel {
    let lowered = text.to_lowercase();
    if mentions_any(&lowered, SENIOR_KEYWORDS) {
        ExperienceLevel::Senior
    } else if mentions_any(&lowered, MID_KEYWORDS) {
        ExperienceLevel::Mid
    } else if mentions_any(&lowered, ENTRY_KEYWORDS) {
        ExperienceLevel::Entry
    } else {
        ExperienceLevel::NotSpecified
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Years required
// ────────────────────────────────────────────────────────────────────────────

static YEARS_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"([0-9]+)\+?\s*(?:years?|yrs?)\s*(?:of)?\s*(?:experience|exp)?")
            .expect("Invalid years regex"),
        Regex::new(r"(?:minimum|at least|min)\s*([0-9]+)\s*(?:years?|yrs?)")
            .expect("Invalid minimum-years regex"),
        Regex::new(r"([0-9]+)\s*-\s*[0-9]+\s*(?:years?|yrs?)").expect("Invalid year-range regex"),
    ]
});

/// ASCII digit run to a number, clamped at `u64::MAX` instead of failing.
fn saturating_parse(digits: &str) -> u64 {
    digits.bytes().fold(0u64, |acc, b| {
        acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
    })
}

/// Smallest number of years captured by any of the three patterns, across
/// every match in the text. Only ASCII digits are recognised.
pub fn extract_years_required(text: &str) -> Option<u64> {
    let lowered = text.to_lowercase();
    YEARS_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(&lowered))
        .filter_map(|caps| caps.get(1).map(|m| saturating_parse(m.as_str())))
        .min()
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Phd,
    Masters,
    Bachelors,
    Degree,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::Phd,
        EducationLevel::Masters,
        EducationLevel::Bachelors,
        EducationLevel::Degree,
    ];

    fn keywords(self) -> &'static [&'static str] {
        match self {
            EducationLevel::Phd => &["phd", "ph.d", "doctorate", "doctoral"],
            EducationLevel::Masters => &["master", "ms", "m.s", "msc", "m.sc", "mba", "ma", "m.a"],
            EducationLevel::Bachelors => &[
                "bachelor", "bs", "b.s", "bsc", "b.sc", "ba", "b.a", "btech", "b.tech", "be",
                "b.e",
            ],
            EducationLevel::Degree => &["degree", "graduate", "graduated", "university", "college"],
        }
    }
}

/// Every bucket with at least one keyword hit, in bucket order.
///
/// Short keywords like `ms` or `be` are plain substrings, so words such as
/// "teams" or "kubernetes" register too.
pub fn detect_education(text: &str) -> Vec<EducationLevel> {
    let lowered = text.to_lowercase();
    EducationLevel::ALL
        .into_iter()
        .filter(|level| mentions_any(&lowered, level.keywords()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_senior_wins_over_lower_levels() {
        assert_eq!(
            detect_experience_level("Junior or mid-level welcome, senior preferred"),
            ExperienceLevel::Senior
        );
        assert_eq!(detect_experience_level("Intermediate, junior ok"), ExperienceLevel::Mid);
        assert_eq!(detect_experience_level("Internship program"), ExperienceLevel::Entry);
        assert_eq!(detect_experience_level("Write code"), ExperienceLevel::NotSpecified);
    }

    #[test]
    fn test_experience_level_serializes_with_space() {
        let json = serde_json::to_string(&ExperienceLevel::NotSpecified).unwrap();
        assert_eq!(json, "\"not specified\"");
        assert_eq!(serde_json::to_string(&ExperienceLevel::Senior).unwrap(), "\"senior\"");
    }

    #[test]
    fn test_years_plus_form() {
        assert_eq!(
            extract_years_required("Looking for a senior Python developer, 5+ years required."),
            Some(5)
        );
    }

    #[test]
    fn test_years_global_minimum_across_patterns() {
        assert_eq!(extract_years_required("3-5 years in backend, 7+ years overall"), Some(3));
        assert_eq!(extract_years_required("at least 4 yrs of Go"), Some(4));
    }

    #[test]
    fn test_oversized_year_counts_are_kept() {
        assert_eq!(
            extract_years_required("10000000000 years of Go, 99999999999999999999999 yrs of C"),
            Some(10_000_000_000)
        );
        assert_eq!(extract_years_required("99999999999999999999999 years"), Some(u64::MAX));
        assert_eq!(extract_years_required("40000000000 years, or 3+ years"), Some(3));
    }

    #[test]
    fn test_years_absent() {
        assert_eq!(extract_years_required("No numbers here"), None);
        assert_eq!(extract_years_required("team of 12 people"), None);
    }

    #[test]
    fn test_education_multiple_buckets() {
        let levels = detect_education("PhD preferred; Bachelor's required");
        assert_eq!(levels, vec![EducationLevel::Phd, EducationLevel::Bachelors]);
    }

    #[test]
    fn test_education_substring_quirk() {
        // "be" inside "kubernetes" counts as a bachelors hint.
        assert_eq!(
            detect_education("Looking for a senior Python developer with Django and Kubernetes experience, 5+ years required."),
            vec![EducationLevel::Bachelors]
        );
        assert!(detect_education("").is_empty());
    }

    #[test]
    fn test_education_serializes_lowercase() {
        let json = serde_json::to_string(&vec![EducationLevel::Masters, EducationLevel::Phd]).unwrap();
        assert_eq!(json, r#"["masters","phd"]"#);
    }
}
