//! Handlers for the `/users` resource: registration, login, lookup.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::user::{CreateUser, User};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    input.validate()?;
    let user = state.storage.create_user(input).await?;
    tracing::info!(user_id = user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/v1/users/login
///
/// Plaintext credential comparison, matching the stored form; the failure
/// message never says which of the two fields was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<User>> {
    let user = state
        .storage
        .get_user_by_username(&input.username)
        .await?
        .filter(|user| user.password == input.password)
        .ok_or(AppError::Core(CoreError::Unauthorized(
            "invalid username or password".to_string(),
        )))?;
    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(user))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = state
        .storage
        .get_user(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}
