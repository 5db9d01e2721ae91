//! Handlers for the `/lost-documents` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::lost_document::{LostDocumentDetail, ReportLost};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/lost-documents
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<LostDocumentDetail>>> {
    let reports = state.storage.get_lost_documents().await?;
    Ok(Json(reports))
}

/// POST /api/v1/lost-documents
///
/// The single entry point for reporting a document lost: flips the
/// document's status and files the report atomically.
pub async fn report(
    State(state): State<AppState>,
    Json(input): Json<ReportLost>,
) -> AppResult<(StatusCode, Json<LostDocumentDetail>)> {
    input.validate()?;
    let detail = state.storage.report_document_lost(input).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/lost-documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<LostDocumentDetail>> {
    let detail = state
        .storage
        .get_lost_document(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LostDocument",
            id,
        }))?;
    Ok(Json(detail))
}
