//! Repository for the `chats` table. Append-only.

use findmydoc_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::chat::{Chat, CreateChat, MessageOrder};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, conversation_id, sender_id, text, image_url, timestamp, read";

/// Provides insert and listing operations for chat messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Insert a message. `text` defaults to empty, `timestamp` to now and
    /// `read` to false.
    pub async fn create(exec: impl PgExecutor<'_>, input: &CreateChat) -> Result<Chat, sqlx::Error> {
        let query = format!(
            "INSERT INTO chats (conversation_id, sender_id, text, image_url, timestamp, read)
             VALUES ($1, $2, COALESCE($3, ''), $4, COALESCE($5, NOW()), COALESCE($6, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(input.conversation_id)
            .bind(input.sender_id)
            .bind(&input.text)
            .bind(&input.image_url)
            .bind(input.timestamp)
            .bind(input.read)
            .fetch_one(exec)
            .await
    }

    /// List a conversation's messages in the requested order, with `id` as
    /// the tiebreak for identical timestamps.
    pub async fn list_by_conversation(
        exec: impl PgExecutor<'_>,
        conversation_id: DbId,
        order: MessageOrder,
    ) -> Result<Vec<Chat>, sqlx::Error> {
        let direction = match order {
            MessageOrder::Asc => "ASC",
            MessageOrder::Desc => "DESC",
        };
        let query = format!(
            "SELECT {COLUMNS} FROM chats WHERE conversation_id = $1
             ORDER BY timestamp {direction}, id {direction}"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(conversation_id)
            .fetch_all(exec)
            .await
    }

    /// The newest message in a conversation, if any.
    pub async fn latest_for_conversation(
        exec: impl PgExecutor<'_>,
        conversation_id: DbId,
    ) -> Result<Option<Chat>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chats WHERE conversation_id = $1
             ORDER BY timestamp DESC, id DESC LIMIT 1"
        );
        sqlx::query_as::<_, Chat>(&query)
            .bind(conversation_id)
            .fetch_optional(exec)
            .await
    }
}
