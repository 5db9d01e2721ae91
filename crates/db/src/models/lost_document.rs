//! Lost-report entity model and DTOs.

use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::document::Document;
use crate::models::user::User;

/// Bare lost-report row from the `lost_documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LostDocument {
    pub id: DbId,
    pub document_id: DbId,
    /// The reporter; always the document owner.
    pub user_id: DbId,
    pub lost_at: Timestamp,
    pub lost_location: Option<String>,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read model for the lost feed: the report joined with the document it
/// references and the owning user.
#[derive(Debug, Clone, Serialize)]
pub struct LostDocumentDetail {
    #[serde(flatten)]
    pub report: LostDocument,
    pub document: Document,
    pub user: User,
}

/// DTO for reporting a document lost.
///
/// This is the single entry point for the `active -> lost` transition: it
/// flips the document status and inserts the lost report in one atomic
/// step, with the reporter taken from the document's owner.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReportLost {
    pub document_id: DbId,
    /// Defaults to now when omitted.
    pub lost_at: Option<Timestamp>,
    pub lost_location: Option<String>,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
}
