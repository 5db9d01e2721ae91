//! Repository for the `lost_documents` table.

use findmydoc_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::lost_document::LostDocument;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, document_id, user_id, lost_at, lost_location, description, created_at, updated_at";

/// Provides CRUD operations for lost reports.
///
/// Inserts only ever happen inside the lost-report transition transaction;
/// there is no standalone create path.
pub struct LostDocumentRepo;

impl LostDocumentRepo {
    /// Insert a lost report. The unique constraint on `document_id`
    /// guarantees at most one report per document.
    pub async fn insert(
        exec: impl PgExecutor<'_>,
        document_id: DbId,
        user_id: DbId,
        lost_at: Timestamp,
        lost_location: Option<&str>,
        description: &str,
    ) -> Result<LostDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO lost_documents (document_id, user_id, lost_at, lost_location, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LostDocument>(&query)
            .bind(document_id)
            .bind(user_id)
            .bind(lost_at)
            .bind(lost_location)
            .bind(description)
            .fetch_one(exec)
            .await
    }

    /// Find a lost report by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<LostDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lost_documents WHERE id = $1");
        sqlx::query_as::<_, LostDocument>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// Find the lost report for a given document, if any.
    pub async fn find_by_document_id(
        exec: impl PgExecutor<'_>,
        document_id: DbId,
    ) -> Result<Option<LostDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lost_documents WHERE document_id = $1");
        sqlx::query_as::<_, LostDocument>(&query)
            .bind(document_id)
            .fetch_optional(exec)
            .await
    }

    /// List all lost reports, most recently lost first.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<LostDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM lost_documents ORDER BY lost_at DESC, id DESC");
        sqlx::query_as::<_, LostDocument>(&query).fetch_all(exec).await
    }
}
