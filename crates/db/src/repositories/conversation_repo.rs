//! Repository for the `conversations` table.

use findmydoc_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgExecutor;

use crate::models::chat::Chat;
use crate::models::conversation::{Conversation, CreateConversation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, participants, last_message, document_id, created_at, updated_at";

/// Provides CRUD operations for conversations.
pub struct ConversationRepo;

impl ConversationRepo {
    /// Insert a new conversation with no messages yet.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateConversation,
    ) -> Result<Conversation, sqlx::Error> {
        let query = format!(
            "INSERT INTO conversations (participants, document_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(Json(&input.participants))
            .bind(input.document_id)
            .fetch_one(exec)
            .await
    }

    /// Find a conversation by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Conversation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM conversations WHERE id = $1");
        sqlx::query_as::<_, Conversation>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List every conversation a user takes part in, most recently
    /// updated first. Membership is jsonb containment on `participants`.
    pub async fn list_by_participant(
        exec: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<Conversation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM conversations
             WHERE participants @> jsonb_build_array($1::bigint)
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Conversation>(&query)
            .bind(user_id)
            .fetch_all(exec)
            .await
    }

    /// Refresh the denormalized `last_message` copy after a send.
    pub async fn set_last_message(
        exec: impl PgExecutor<'_>,
        id: DbId,
        message: &Chat,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE conversations SET last_message = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(Json(message))
            .execute(exec)
            .await?;
        Ok(())
    }
}
