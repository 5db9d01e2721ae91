//! Repository for the `translations` table.

use sqlx::PgExecutor;

use crate::models::translation::{CreateTranslation, Translation, UpdateTranslation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, en, pt, created_at, updated_at";

/// Provides CRUD operations for translation entries, addressed by key.
pub struct TranslationRepo;

impl TranslationRepo {
    /// Insert a translation entry.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateTranslation,
    ) -> Result<Translation, sqlx::Error> {
        let query = format!(
            "INSERT INTO translations (key, en, pt)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(&input.key)
            .bind(&input.en)
            .bind(&input.pt)
            .fetch_one(exec)
            .await
    }

    /// Find a translation entry by its `section.key` path.
    pub async fn find_by_key(
        exec: impl PgExecutor<'_>,
        key: &str,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM translations WHERE key = $1");
        sqlx::query_as::<_, Translation>(&query)
            .bind(key)
            .fetch_optional(exec)
            .await
    }

    /// List all translation entries ordered by key.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<Translation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM translations ORDER BY key");
        sqlx::query_as::<_, Translation>(&query).fetch_all(exec).await
    }

    /// Patch a translation entry by key. Only non-`None` fields are applied.
    ///
    /// Returns `None` if the key is unknown.
    pub async fn update_by_key(
        exec: impl PgExecutor<'_>,
        key: &str,
        input: &UpdateTranslation,
    ) -> Result<Option<Translation>, sqlx::Error> {
        let query = format!(
            "UPDATE translations SET
                en = COALESCE($2, en),
                pt = COALESCE($3, pt),
                updated_at = NOW()
             WHERE key = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Translation>(&query)
            .bind(key)
            .bind(&input.en)
            .bind(&input.pt)
            .fetch_optional(exec)
            .await
    }
}
