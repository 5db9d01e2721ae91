//! Handlers for the `/translations` resource.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::translations::{group_by_section, SectionTranslations};
use findmydoc_db::models::translation::{CreateTranslation, Translation, UpdateTranslation};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/translations
///
/// Returns the nested `{section: {en: {...}, pt: {...}}}` shape the client
/// consumes, grouped from the flat `section.key` rows.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, SectionTranslations>>> {
    let rows = state.storage.list_translations().await?;
    let grouped = group_by_section(rows.iter().map(|row| (&row.key, &row.en, &row.pt)));
    Ok(Json(grouped))
}

/// GET /api/v1/translations/{key}
pub async fn get_by_key(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Json<Translation>> {
    let translation = state
        .storage
        .get_translation(&key)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundByKey {
            entity: "Translation",
            key,
        }))?;
    Ok(Json(translation))
}

/// POST /api/v1/translations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTranslation>,
) -> AppResult<(StatusCode, Json<Translation>)> {
    input.validate()?;
    let translation = state.storage.create_translation(input).await?;
    Ok((StatusCode::CREATED, Json(translation)))
}

/// PUT /api/v1/translations/{key}
pub async fn update(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<UpdateTranslation>,
) -> AppResult<Json<Translation>> {
    let translation = state.storage.update_translation(&key, input).await?;
    Ok(Json(translation))
}
