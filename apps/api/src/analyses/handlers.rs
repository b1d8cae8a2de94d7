//! Axum route handlers for the Analyses API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::analyses::pipeline::{run_analysis, AnalysisRequest, UploadedResume};
use crate::analyses::AnalysisView;
use crate::errors::AppError;
use crate::models::analysis::AnalysisSummary;
use crate::state::AppState;

const HISTORY_LIMIT: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub session_id: String,
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File is too large.".to_string())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

/// Collects the `resume`, `job_description` and `session_id` fields; unknown
/// fields are ignored.
async fn read_analysis_form(mut multipart: Multipart) -> Result<AnalysisRequest, AppError> {
    let mut request = AnalysisRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                request.resume = Some(UploadedResume { filename, bytes });
            }
            "job_description" => {
                request.job_description = field.text().await.map_err(multipart_error)?;
            }
            "session_id" => {
                request.session_id = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }
    Ok(request)
}

/// POST /api/v1/analyses
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AnalysisView>), AppError> {
    let request = read_analysis_form(multipart).await?;
    let stored = run_analysis(&state, request).await?;
    Ok((StatusCode::CREATED, Json(AnalysisView::from(stored))))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AnalysisView>, AppError> {
    let stored = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(AnalysisView::from(stored)))
}

/// GET /api/v1/analyses?session_id=
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(params): Query<SessionQuery>,
) -> Result<Json<Vec<AnalysisSummary>>, AppError> {
    let summaries = state.store.recent(&params.session_id, HISTORY_LIMIT).await?;
    Ok(Json(summaries))
}
