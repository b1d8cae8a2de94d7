use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::suggestions::score_category;

/// One row of the `analyses` table. JSON columns are kept as text here and
/// decoded by the store.
#[derive(Debug, Clone, FromRow)]
pub struct AnalysisRow {
    pub id: i64,
    pub session_id: Option<String>,
    pub resume_filename: String,
    pub resume_text: String,
    pub job_description: String,
    pub match_score: f64,
    pub analysis_data: String,
    pub ai_analysis: Option<String>,
    pub suggestions: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct AnalysisSummaryRow {
    pub id: i64,
    pub resume_filename: String,
    pub match_score: f64,
    pub created_at: DateTime<Utc>,
}

/// History list entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub id: i64,
    pub resume_filename: String,
    pub match_score: f64,
    pub score_category: &'static str,
    pub score_class: &'static str,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisSummaryRow> for AnalysisSummary {
    fn from(row: AnalysisSummaryRow) -> Self {
        let (label, class) = score_category(row.match_score);
        Self {
            id: row.id,
            resume_filename: row.resume_filename,
            match_score: row.match_score,
            score_category: label,
            score_class: class.as_str(),
            created_at: row.created_at,
        }
    }
}
