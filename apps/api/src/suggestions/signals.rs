//! Resume micro-detectors used by the suggestion rules.
//!
//! Each detector looks at the raw resume text (never the normalized form).

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

pub const ACTION_VERBS: &[(&str, &[&str])] = &[
    ("leadership", &["led", "managed", "directed", "supervised", "coordinated", "oversaw"]),
    ("achievement", &["achieved", "accomplished", "exceeded", "delivered", "completed"]),
    ("creation", &["created", "designed", "developed", "built", "implemented", "launched"]),
    ("improvement", &["improved", "enhanced", "optimized", "streamlined", "reduced", "increased"]),
    ("technical", &["engineered", "architected", "automated", "integrated", "deployed", "configured"]),
    ("analysis", &["analyzed", "evaluated", "assessed", "researched", "investigated", "identified"]),
];

pub const IMPORTANT_SECTIONS: &[&str] =
    &["experience", "education", "skills", "projects", "summary", "objective"];

pub const CRITICAL_SECTIONS: &[&str] = &["experience", "education", "skills"];

// ────────────────────────────────────────────────────────────────────────────
// Action verbs
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionVerbReport {
    /// Distinct verbs found per category, in `ACTION_VERBS` order.
    pub per_category: Vec<(&'static str, usize)>,
    pub total: usize,
}

impl ActionVerbReport {
    /// Categories with no verb occurrence at all.
    pub fn empty_categories(&self) -> Vec<&'static str> {
        self.per_category
            .iter()
            .filter(|(_, count)| *count == 0)
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Counts how many distinct action verbs occur in the text. A verb counts
/// once however often it repeats; matching is a case-insensitive substring
/// search.
pub fn count_action_verbs(text: &str) -> ActionVerbReport {
    let lowered = text.to_lowercase();
    let per_category: Vec<(&'static str, usize)> = ACTION_VERBS
        .iter()
        .map(|(name, verbs)| {
            let hits = verbs.iter().map(|v| usize::from(lowered.contains(v))).sum();
            (*name, hits)
        })
        .collect();
    let total = per_category.iter().map(|(_, n)| n).sum();
    ActionVerbReport { per_category, total }
}

// ────────────────────────────────────────────────────────────────────────────
// Quantifiable metrics
// ────────────────────────────────────────────────────────────────────────────

const METRIC_SAMPLE_LIMIT: usize = 10;

static METRIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\d+%",     // percentages
        r"\$[\d,]+", // dollar amounts
        r"\d+\+",    // "10+"
        r"\d{2,}",   // bare numbers
        r"#\d+",     // rankings
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid metric regex"))
    .collect()
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricReport {
    pub count: usize,
    /// First matches in pattern order, capped at ten.
    pub samples: Vec<String>,
}

/// Counts matches of every metric pattern independently; one snippet can be
/// counted by several patterns ("30%" is both a percentage and a number).
pub fn find_metrics(text: &str) -> MetricReport {
    let mut count = 0;
    let mut samples = Vec::new();
    for pattern in METRIC_PATTERNS.iter() {
        for m in pattern.find_iter(text) {
            count += 1;
            if samples.len() < METRIC_SAMPLE_LIMIT {
                samples.push(m.as_str().to_string());
            }
        }
    }
    MetricReport { count, samples }
}

// ────────────────────────────────────────────────────────────────────────────
// Length, sections, contact
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LengthReport {
    pub words: usize,
    pub lines: usize,
}

pub fn measure_length(text: &str) -> LengthReport {
    LengthReport {
        words: text.split_whitespace().count(),
        lines: text.split('\n').count(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub found: Vec<&'static str>,
    pub missing: Vec<&'static str>,
}

impl SectionReport {
    pub fn critical_missing(&self) -> Vec<&'static str> {
        self.missing
            .iter()
            .copied()
            .filter(|s| CRITICAL_SECTIONS.contains(s))
            .collect()
    }
}

pub fn find_sections(text: &str) -> SectionReport {
    let lowered = text.to_lowercase();
    let (found, missing): (Vec<&'static str>, Vec<&'static str>) = IMPORTANT_SECTIONS
        .iter()
        .copied()
        .partition(|section| lowered.contains(section));
    SectionReport { found, missing }
}

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("Invalid email regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+?[\d\s\-()]{10,}").expect("Invalid phone regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactReport {
    pub email: bool,
    pub phone: bool,
    pub linkedin: bool,
    pub github: bool,
    pub portfolio: bool,
}

pub fn check_contact_info(text: &str) -> ContactReport {
    let lowered = text.to_lowercase();
    ContactReport {
        email: EMAIL.is_match(text),
        phone: PHONE.is_match(text),
        linkedin: lowered.contains("linkedin"),
        github: lowered.contains("github"),
        portfolio: ["portfolio", "website", "blog"].iter().any(|w| lowered.contains(w)),
    }
}

/// Every detector's report for one resume, as shown alongside a stored
/// analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumeSignals {
    pub action_verbs: ActionVerbReport,
    pub metrics: MetricReport,
    pub length: LengthReport,
    pub sections: SectionReport,
    pub contact: ContactReport,
}

pub fn collect_signals(text: &str) -> ResumeSignals {
    ResumeSignals {
        action_verbs: count_action_verbs(text),
        metrics: find_metrics(text),
        length: measure_length(text),
        sections: find_sections(text),
        contact: check_contact_info(text),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills in context
// ────────────────────────────────────────────────────────────────────────────

static VERB_ALTERNATION: LazyLock<String> = LazyLock::new(|| {
    ACTION_VERBS
        .iter()
        .flat_map(|(_, verbs)| verbs.iter().copied())
        .collect::<Vec<_>>()
        .join("|")
});

/// Returns `(contextual, total)`: how many of `skills` appear within 50
/// characters (either side, same line) of any action verb.
pub fn contextual_skill_usage<S: AsRef<str>>(text: &str, skills: &[S]) -> (usize, usize) {
    let lowered = text.to_lowercase();
    let verbs = VERB_ALTERNATION.as_str();

    let contextual = skills
        .iter()
        .filter(|skill| {
            let escaped = regex::escape(&skill.as_ref().to_lowercase());
            let pattern = format!(r"(?:{verbs}).{{0,50}}{escaped}|{escaped}.{{0,50}}(?:{verbs})");
            Regex::new(&pattern).is_ok_and(|re| re.is_match(&lowered))
        })
        .count();

    (contextual, skills.len())
}
