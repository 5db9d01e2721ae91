//! Handlers for the `/user-settings` resource, keyed by user id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::user_settings::{CreateUserSettings, UpdateUserSettings, UserSettings};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/user-settings/{user_id}
pub async fn get_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<Json<UserSettings>> {
    let settings = state
        .storage
        .get_user_settings(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "UserSettings",
            id: user_id,
        }))?;
    Ok(Json(settings))
}

/// POST /api/v1/user-settings
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUserSettings>,
) -> AppResult<(StatusCode, Json<UserSettings>)> {
    let settings = state.storage.create_user_settings(input).await?;
    Ok((StatusCode::CREATED, Json(settings)))
}

/// PUT /api/v1/user-settings/{user_id}
pub async fn update(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
    Json(input): Json<UpdateUserSettings>,
) -> AppResult<Json<UserSettings>> {
    let settings = state.storage.update_user_settings(user_id, input).await?;
    Ok(Json(settings))
}
