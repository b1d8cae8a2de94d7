//! Persistence boundary for analysis records.
//!
//! `AppState` carries an `Arc<dyn AnalysisStore>`; the SQLite implementation
//! is the only production backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::info;

use crate::enrichment::EnrichedInsights;
use crate::errors::AppError;
use crate::matching::AnalysisResult;
use crate::models::analysis::{AnalysisRow, AnalysisSummary, AnalysisSummaryRow};
use crate::suggestions::SuggestionItem;

/// Everything needed to write one analysis record.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub session_id: String,
    pub resume_filename: String,
    pub resume_text: String,
    pub job_description: String,
    pub analysis: AnalysisResult,
    pub suggestions: Vec<SuggestionItem>,
    pub ai_analysis: Option<EnrichedInsights>,
}

/// A record read back with its JSON columns decoded.
#[derive(Debug, Clone)]
pub struct StoredAnalysis {
    pub id: i64,
    pub session_id: Option<String>,
    pub resume_filename: String,
    pub resume_text: String,
    pub job_description: String,
    pub analysis: AnalysisResult,
    pub suggestions: Vec<SuggestionItem>,
    pub ai_analysis: Option<EnrichedInsights>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<AnalysisRow> for StoredAnalysis {
    type Error = serde_json::Error;

    fn try_from(row: AnalysisRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            session_id: row.session_id,
            resume_filename: row.resume_filename,
            resume_text: row.resume_text,
            job_description: row.job_description,
            analysis: serde_json::from_str(&row.analysis_data)?,
            suggestions: serde_json::from_str(&row.suggestions)?,
            ai_analysis: row
                .ai_analysis
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Appends a record and returns its id.
    async fn insert(&self, record: &NewAnalysis) -> Result<i64, AppError>;

    async fn get(&self, id: i64) -> Result<Option<StoredAnalysis>, AppError>;

    /// Newest first.
    async fn recent(&self, session_id: &str, limit: u32) -> Result<Vec<AnalysisSummary>, AppError>;
}

pub struct SqliteAnalysisStore {
    pool: SqlitePool,
}

impl SqliteAnalysisStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for SqliteAnalysisStore {
    async fn insert(&self, record: &NewAnalysis) -> Result<i64, AppError> {
        let analysis_data = serde_json::to_string(&record.analysis)?;
        let suggestions = serde_json::to_string(&record.suggestions)?;
        let ai_analysis = record
            .ai_analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let id = sqlx::query(
            r#"
            INSERT INTO analyses
                (session_id, resume_filename, resume_text, job_description,
                 match_score, analysis_data, ai_analysis, suggestions, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.session_id)
        .bind(&record.resume_filename)
        .bind(&record.resume_text)
        .bind(&record.job_description)
        .bind(record.analysis.match_score)
        .bind(analysis_data)
        .bind(ai_analysis)
        .bind(suggestions)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(id, score = record.analysis.match_score, "Analysis stored");
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<StoredAnalysis>, AppError> {
        let row = sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(StoredAnalysis::try_from).transpose()?)
    }

    async fn recent(&self, session_id: &str, limit: u32) -> Result<Vec<AnalysisSummary>, AppError> {
        let rows = sqlx::query_as::<_, AnalysisSummaryRow>(
            r#"
            SELECT id, resume_filename, match_score, created_at
            FROM analyses
            WHERE session_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(session_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AnalysisSummary::from).collect())
    }
}
