//! Found-report entity model and DTOs.

use findmydoc_core::lifecycle::FoundDocumentStatus;
use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// Full found-report row from the `found_documents` table.
///
/// A found report is independent of any registered document: the finder
/// describes what they picked up, and `possible_matches` optionally names
/// document ids the report might correspond to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FoundDocument {
    pub id: DbId,
    /// The finder.
    pub found_by: DbId,
    pub found_location: String,
    /// Free-text category; deliberately not a FK into `documents`.
    pub document_type: String,
    pub description: String,
    pub image_url: Option<String>,
    pub found_at: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: FoundDocumentStatus,
    pub possible_matches: Option<Json<Vec<DbId>>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for filing a found report. Status defaults to `pending` and
/// `found_at` to now.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFoundDocument {
    pub found_by: DbId,
    #[validate(length(min = 1, message = "found_location must not be empty"))]
    pub found_location: String,
    #[validate(length(min = 1, message = "document_type must not be empty"))]
    pub document_type: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    pub image_url: Option<String>,
    pub found_at: Option<Timestamp>,
    pub possible_matches: Option<Vec<DbId>>,
}
