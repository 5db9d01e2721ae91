//! Handlers for the `/documents` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::document::{CreateDocument, Document, UpdateDocument};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<DbId>,
}

/// GET /api/v1/documents?user_id=
///
/// Documents are always listed per owner; a listing without `user_id`
/// would be a cross-user dump, so the parameter is required.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Document>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id query parameter is required".to_string()))?;
    let documents = state.storage.documents_by_user(user_id).await?;
    Ok(Json(documents))
}

/// POST /api/v1/documents
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    input.validate()?;
    let document = state.storage.create_document(input).await?;
    tracing::info!(document_id = document.id, "Document registered");
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/documents/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Document>> {
    let document = state
        .storage
        .get_document(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// PUT /api/v1/documents/{id}
///
/// Plain field patch; a status change to `lost` is rejected here and must
/// go through `POST /lost-documents`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateDocument>,
) -> AppResult<Json<Document>> {
    let document = state
        .storage
        .update_document(id, input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))?;
    Ok(Json(document))
}

/// DELETE /api/v1/documents/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if state.storage.delete_document(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Document",
            id,
        }))
    }
}
