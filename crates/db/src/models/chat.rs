//! Chat message entity model and DTOs.

use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Single message row from the `chats` table. Append-only: there is no
/// update or delete path.
///
/// Also stored denormalized as the parent conversation's `last_message`
/// jsonb column, hence the `Deserialize` derive.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Chat {
    pub id: DbId,
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub text: String,
    pub image_url: Option<String>,
    pub timestamp: Timestamp,
    pub read: bool,
}

/// DTO for sending a message. Either `text` or `image_url` should be set;
/// `timestamp` defaults to now and `read` to false.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateChat {
    pub conversation_id: DbId,
    pub sender_id: DbId,
    pub text: Option<String>,
    pub image_url: Option<String>,
    pub timestamp: Option<Timestamp>,
    pub read: Option<bool>,
}

/// Explicit ordering for message listings.
///
/// The two callers genuinely disagree (chronological for display, newest
/// first for recency lookups) so the order is always requested, never
/// assumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOrder {
    /// Oldest first, for rendering a thread.
    Asc,
    /// Newest first, for "most recent" lookups.
    Desc,
}
