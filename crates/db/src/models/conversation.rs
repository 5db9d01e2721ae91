//! Conversation entity model and DTOs.

use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

use crate::models::chat::Chat;

/// Full conversation row from the `conversations` table.
///
/// `last_message` is a denormalized copy of the newest [`Chat`], refreshed
/// on every send so conversation lists render without a per-row query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Conversation {
    pub id: DbId,
    pub participants: Json<Vec<DbId>>,
    pub last_message: Option<Json<Chat>>,
    /// Optional document this conversation is about.
    pub document_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Conversation {
    /// Whether the given user takes part in this conversation.
    pub fn has_participant(&self, user_id: DbId) -> bool {
        self.participants.0.contains(&user_id)
    }
}

/// DTO for opening a conversation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateConversation {
    #[validate(length(min = 2, message = "a conversation needs at least two participants"))]
    pub participants: Vec<DbId>,
    pub document_id: Option<DbId>,
}
