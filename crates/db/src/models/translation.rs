//! Translation entity model and DTOs. Plain key-value record.

use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Translation row from the `translations` table.
///
/// `key` is a `section.key` path, e.g. `home.title`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Translation {
    pub id: DbId,
    pub key: String,
    pub en: String,
    pub pt: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a translation entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTranslation {
    #[validate(length(min = 1, message = "key must not be empty"))]
    pub key: String,
    pub en: String,
    pub pt: String,
}

/// DTO for patching a translation entry by key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTranslation {
    pub en: Option<String>,
    pub pt: Option<String>,
}
