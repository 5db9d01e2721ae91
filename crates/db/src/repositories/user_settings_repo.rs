//! Repository for the `user_settings` table.

use findmydoc_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user_settings::{CreateUserSettings, UpdateUserSettings, UserSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, language, notifications_enabled, dark_mode, created_at, updated_at";

/// Provides CRUD operations for per-user settings.
pub struct UserSettingsRepo;

impl UserSettingsRepo {
    /// Insert a settings row for a user. The unique constraint on
    /// `user_id` enforces one row per user.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateUserSettings,
    ) -> Result<UserSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id, language, notifications_enabled, dark_mode)
             VALUES ($1, COALESCE($2, 'en'), COALESCE($3, TRUE), COALESCE($4, FALSE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(input.user_id)
            .bind(&input.language)
            .bind(input.notifications_enabled)
            .bind(input.dark_mode)
            .fetch_one(exec)
            .await
    }

    /// Find the settings row for a user.
    pub async fn find_by_user_id(
        exec: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_optional(exec)
            .await
    }

    /// Patch a user's settings. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the user has no settings row.
    pub async fn update_by_user_id(
        exec: impl PgExecutor<'_>,
        user_id: DbId,
        input: &UpdateUserSettings,
    ) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!(
            "UPDATE user_settings SET
                language = COALESCE($2, language),
                notifications_enabled = COALESCE($3, notifications_enabled),
                dark_mode = COALESCE($4, dark_mode),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .bind(&input.language)
            .bind(input.notifications_enabled)
            .bind(input.dark_mode)
            .fetch_optional(exec)
            .await
    }
}
