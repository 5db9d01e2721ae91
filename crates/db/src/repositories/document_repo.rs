//! Repository for the `documents` table.

use findmydoc_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::document::{CreateDocument, Document, UpdateDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, type, name, document_number, description, status, \
                       image_url, lost_at, lost_location, created_at, updated_at";

/// Provides CRUD operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document, returning the created row. Status starts at
    /// `active` (column default).
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (user_id, type, name, document_number, description, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(input.user_id)
            .bind(&input.doc_type)
            .bind(&input.name)
            .bind(&input.document_number)
            .bind(&input.description)
            .bind(&input.image_url)
            .fetch_one(exec)
            .await
    }

    /// Find a document by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Find a document by ID, taking a row lock for the rest of the
    /// transaction. Used by the lost-report transition.
    pub async fn find_by_id_for_update(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List a user's documents, most recently created first.
    pub async fn list_by_user(
        exec: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM documents WHERE user_id = $1 ORDER BY created_at DESC");
        sqlx::query_as::<_, Document>(&query)
            .bind(user_id)
            .fetch_all(exec)
            .await
    }

    /// Update a document. Only non-`None` fields in `input` are applied.
    /// Status validation happens in the storage layer, which sees the
    /// current row first.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        exec: impl PgExecutor<'_>,
        id: DbId,
        input: &UpdateDocument,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET
                type = COALESCE($2, type),
                name = COALESCE($3, name),
                document_number = COALESCE($4, document_number),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                image_url = COALESCE($7, image_url),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(&input.doc_type)
            .bind(&input.name)
            .bind(&input.document_number)
            .bind(&input.description)
            .bind(input.status.map(|s| s.as_str()))
            .bind(&input.image_url)
            .fetch_optional(exec)
            .await
    }

    /// Flip a document to `lost`, stamping when and where it went missing.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn mark_lost(
        exec: impl PgExecutor<'_>,
        id: DbId,
        lost_at: Timestamp,
        lost_location: Option<&str>,
    ) -> Result<Option<Document>, sqlx::Error> {
        let query = format!(
            "UPDATE documents SET status = 'lost', lost_at = $2, lost_location = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .bind(lost_at)
            .bind(lost_location)
            .fetch_optional(exec)
            .await
    }

    /// Delete a document. Returns `true` if a row existed and was removed;
    /// any lost report referencing it goes with it (FK cascade).
    pub async fn delete(exec: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(exec)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
