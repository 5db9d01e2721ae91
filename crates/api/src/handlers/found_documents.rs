//! Handlers for the `/found-documents` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::found_document::{CreateFoundDocument, FoundDocument};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/found-documents
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<FoundDocument>>> {
    let reports = state.storage.get_found_documents().await?;
    Ok(Json(reports))
}

/// POST /api/v1/found-documents
///
/// Files the report and awards the finder their points in one step.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFoundDocument>,
) -> AppResult<(StatusCode, Json<FoundDocument>)> {
    input.validate()?;
    let report = state.storage.create_found_document(input).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /api/v1/found-documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<FoundDocument>> {
    let report = state
        .storage
        .get_found_document(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "FoundDocument",
            id,
        }))?;
    Ok(Json(report))
}
