pub mod handlers;
pub mod pipeline;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::enrichment::EnrichedInsights;
use crate::matching::AnalysisResult;
use crate::store::StoredAnalysis;
use crate::suggestions::signals::{collect_signals, ResumeSignals};
use crate::suggestions::{score_category, SuggestionItem};

/// API representation of one stored analysis. The analysis fields are
/// flattened into the top-level object.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisView {
    pub id: i64,
    pub session_id: Option<String>,
    pub resume_filename: String,
    pub job_description: String,
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub suggestions: Vec<SuggestionItem>,
    pub ai_analysis: Option<EnrichedInsights>,
    /// Detector reports recomputed from the stored resume text.
    pub resume_signals: ResumeSignals,
    pub score_category: &'static str,
    pub score_class: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<StoredAnalysis> for AnalysisView {
    fn from(stored: StoredAnalysis) -> Self {
        let (label, class) = score_category(stored.analysis.match_score);
        let resume_signals = collect_signals(&stored.resume_text);
        Self {
            id: stored.id,
            session_id: stored.session_id,
            resume_filename: stored.resume_filename,
            job_description: stored.job_description,
            analysis: stored.analysis,
            suggestions: stored.suggestions,
            ai_analysis: stored.ai_analysis,
            resume_signals,
            score_category: label,
            score_class: class.as_str(),
            created_at: stored.created_at,
        }
    }
}
