//! Repository for the `found_documents` table.

use findmydoc_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgExecutor;

use crate::models::found_document::{CreateFoundDocument, FoundDocument};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, found_by, found_location, document_type, description, image_url, \
                       found_at, status, possible_matches, created_at, updated_at";

/// Provides CRUD operations for found reports.
pub struct FoundDocumentRepo;

impl FoundDocumentRepo {
    /// Insert a found report. Status starts at `pending` (column default)
    /// and `found_at` defaults to now when absent.
    pub async fn create(
        exec: impl PgExecutor<'_>,
        input: &CreateFoundDocument,
    ) -> Result<FoundDocument, sqlx::Error> {
        let query = format!(
            "INSERT INTO found_documents
                (found_by, found_location, document_type, description, image_url, found_at, possible_matches)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, NOW()), $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FoundDocument>(&query)
            .bind(input.found_by)
            .bind(&input.found_location)
            .bind(&input.document_type)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.found_at)
            .bind(input.possible_matches.clone().map(Json))
            .fetch_one(exec)
            .await
    }

    /// Find a found report by internal ID.
    pub async fn find_by_id(
        exec: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<FoundDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM found_documents WHERE id = $1");
        sqlx::query_as::<_, FoundDocument>(&query)
            .bind(id)
            .fetch_optional(exec)
            .await
    }

    /// List all found reports, most recently found first.
    pub async fn list(exec: impl PgExecutor<'_>) -> Result<Vec<FoundDocument>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM found_documents ORDER BY found_at DESC, id DESC");
        sqlx::query_as::<_, FoundDocument>(&query).fetch_all(exec).await
    }
}
