//! Per-user settings model and DTOs. Plain key-value record, no lifecycle.

use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Settings row from the `user_settings` table, one per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSettings {
    pub id: DbId,
    pub user_id: DbId,
    /// UI language code, `en` or `pt`.
    pub language: String,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a settings row. Defaults: `en`, notifications on,
/// dark mode off.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserSettings {
    pub user_id: DbId,
    pub language: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
}

/// DTO for patching a settings row. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserSettings {
    pub language: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
}
