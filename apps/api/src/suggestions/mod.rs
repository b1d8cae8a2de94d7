//! Rule-based suggestion engine.
//!
//! A fixed, ordered table of [`SuggestionRule`]s is evaluated against one
//! [`AnalysisResult`] plus the raw resume text. Output order follows the table;
//! no rule sees or reorders another rule's items.

pub mod rules;
pub mod signals;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::matching::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionItem {
    #[serde(rename = "type")]
    pub severity: Severity,
    pub category: String,
    pub message: String,
}

impl SuggestionItem {
    pub fn new(severity: Severity, category: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message: message.into(),
        }
    }
}

/// One step of the cascade. Implementations are stateless.
pub trait SuggestionRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, analysis: &AnalysisResult, resume_text: &str) -> Vec<SuggestionItem>;
}

/// Evaluates every rule in [`rules::RULES`] order and concatenates the items.
pub fn generate_suggestions(resume_text: &str, analysis: &AnalysisResult) -> Vec<SuggestionItem> {
    rules::RULES
        .iter()
        .flat_map(|rule| {
            let items = rule.evaluate(analysis, resume_text);
            if !items.is_empty() {
                debug!(rule = rule.name(), items = items.len(), "Suggestion rule fired");
            }
            items
        })
        .collect()
}

/// Display label and severity class for a match score.
pub fn score_category(score: f64) -> (&'static str, Severity) {
    match score {
        s if s >= 80.0 => ("Excellent", Severity::Success),
        s if s >= 60.0 => ("Good", Severity::Info),
        s if s >= 40.0 => ("Fair", Severity::Warning),
        _ => ("Needs Work", Severity::Danger),
    }
}
