//! Request pipeline: validate → extract → analyze → (suggest ∥ enrich) → store.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::enrichment::{EnrichedInsights, Enricher};
use crate::errors::AppError;
use crate::extraction::{allowed_file, extract_text};
use crate::matching::{analyze, AnalysisResult};
use crate::state::AppState;
use crate::store::{NewAnalysis, StoredAnalysis};
use crate::suggestions::generate_suggestions;

pub const MSG_NO_FILE: &str = "No file uploaded.";
pub const MSG_NO_FILENAME: &str = "No file selected.";
pub const MSG_NO_JOB_DESCRIPTION: &str = "Please enter a job description.";
pub const MSG_BAD_FILE_TYPE: &str = "Invalid file type. Only PDF and DOCX files are allowed.";
pub const MSG_EMPTY_TEXT: &str =
    "Could not extract text from the resume. Please ensure it contains readable text.";

#[derive(Debug, Clone)]
pub struct UploadedResume {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub resume: Option<UploadedResume>,
    pub job_description: String,
    pub session_id: Option<String>,
}

/// Runs one analysis end to end and returns the stored record. Nothing is
/// written unless every validation and extraction step succeeds.
pub async fn run_analysis(state: &AppState, request: AnalysisRequest) -> Result<StoredAnalysis, AppError> {
    let upload = request
        .resume
        .ok_or_else(|| AppError::Validation(MSG_NO_FILE.to_string()))?;
    if upload.filename.is_empty() {
        return Err(AppError::Validation(MSG_NO_FILENAME.to_string()));
    }
    let job_description = request.job_description.trim().to_string();
    if job_description.is_empty() {
        return Err(AppError::Validation(MSG_NO_JOB_DESCRIPTION.to_string()));
    }
    if !allowed_file(&upload.filename) {
        return Err(AppError::Validation(MSG_BAD_FILE_TYPE.to_string()));
    }

    let resume_text = extract_on_blocking_pool(upload.filename.clone(), upload.bytes).await?;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation(MSG_EMPTY_TEXT.to_string()));
    }

    let analysis = analyze(&resume_text, &job_description);

    let timeout = Duration::from_secs(state.config.enrichment_timeout_secs);
    let (suggestions, ai_analysis) = tokio::join!(
        async { generate_suggestions(&resume_text, &analysis) },
        enrich_with_timeout(
            state.enricher.as_ref(),
            timeout,
            &resume_text,
            &job_description,
            &analysis,
        ),
    );

    let session_id = request
        .session_id
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let record = NewAnalysis {
        session_id,
        resume_filename: stored_filename(&upload.filename),
        resume_text,
        job_description,
        analysis,
        suggestions,
        ai_analysis,
    };

    let id = state.store.insert(&record).await?;
    info!(
        id,
        session_id = %record.session_id,
        score = record.analysis.match_score,
        "Analysis complete"
    );

    state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("analysis {id} vanished after insert")))
}

async fn extract_on_blocking_pool(filename: String, bytes: Bytes) -> Result<String, AppError> {
    let outcome = tokio::task::spawn_blocking(move || extract_text(&filename, &bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in text extraction: {e}")))?;
    outcome.map_err(|e| {
        warn!(error = %e, "Resume text extraction failed");
        AppError::Extraction(e)
    })
}

/// Enrichment bounded by `timeout`; unavailable backends are not called.
pub async fn enrich_with_timeout(
    enricher: &dyn Enricher,
    timeout: Duration,
    resume_text: &str,
    job_description: &str,
    analysis: &AnalysisResult,
) -> Option<EnrichedInsights> {
    if !enricher.is_available() {
        return None;
    }
    match tokio::time::timeout(timeout, enricher.enrich(resume_text, job_description, analysis)).await {
        Ok(Some(insights)) if insights.is_degraded() => {
            warn!(reason = insights.error().unwrap_or_default(), "AI enrichment degraded");
            Some(insights)
        }
        Ok(insights) => insights,
        Err(_) => {
            warn!(timeout_secs = timeout.as_secs(), "AI enrichment timed out");
            None
        }
    }
}

/// Keeps `[A-Za-z0-9._-]`, turns whitespace runs and path separators into `_`,
/// and trims leading/trailing dots and underscores.
pub fn sanitize_filename(filename: &str) -> String {
    let spaced: String = filename
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let trimmed = kept.trim_matches(|c| c == '.' || c == '_');
    if trimmed.is_empty() {
        "resume".to_string()
    } else {
        trimmed.to_string()
    }
}

fn stored_filename(original: &str) -> String {
    format!(
        "{}_{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        sanitize_filename(original)
    )
}
