//! Handlers for conversations and the `/messages` send endpoint.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;
use findmydoc_db::models::chat::{Chat, CreateChat, MessageOrder};
use findmydoc_db::models::conversation::{Conversation, CreateConversation};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub user_id: Option<DbId>,
}

/// GET /api/v1/conversations?user_id=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Conversation>>> {
    let user_id = query
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id query parameter is required".to_string()))?;
    let conversations = state.storage.conversations_by_user(user_id).await?;
    Ok(Json(conversations))
}

/// POST /api/v1/conversations
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateConversation>,
) -> AppResult<(StatusCode, Json<Conversation>)> {
    input.validate()?;
    let conversation = state.storage.create_conversation(input).await?;
    Ok((StatusCode::CREATED, Json(conversation)))
}

/// GET /api/v1/conversations/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Conversation>> {
    let conversation = state
        .storage
        .get_conversation(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Conversation",
            id,
        }))?;
    Ok(Json(conversation))
}

/// GET /api/v1/conversations/{id}/messages
///
/// Chronological (oldest first), the order a thread is rendered in.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Chat>>> {
    let messages = state
        .storage
        .messages_by_conversation(id, MessageOrder::Asc)
        .await?;
    Ok(Json(messages))
}

/// POST /api/v1/messages
pub async fn send_message(
    State(state): State<AppState>,
    Json(input): Json<CreateChat>,
) -> AppResult<(StatusCode, Json<Chat>)> {
    let message = state.storage.create_message(input).await?;
    Ok((StatusCode::CREATED, Json(message)))
}
