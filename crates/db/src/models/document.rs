//! Document entity model and DTOs.

use findmydoc_core::lifecycle::DocumentStatus;
use findmydoc_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full document row from the `documents` table.
///
/// `lost_at`/`lost_location` are populated only while `status` is `lost`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub user_id: DbId,
    /// Document category, e.g. `id_card`, `drivers_license`, `passport`.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub doc_type: String,
    pub name: String,
    pub document_number: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: DocumentStatus,
    pub image_url: Option<String>,
    pub lost_at: Option<Timestamp>,
    pub lost_location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a new document. Status defaults to `active`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDocument {
    pub user_id: DbId,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "type must not be empty"))]
    pub doc_type: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "document_number must not be empty"))]
    pub document_number: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// DTO for updating an existing document. All fields are optional.
///
/// A status patch to `lost` is rejected; the lost transition has a single
/// entry point ([`crate::storage::Storage::report_document_lost`]) so the
/// document row and its lost report can never diverge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDocument {
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub name: Option<String>,
    pub document_number: Option<String>,
    pub description: Option<String>,
    pub status: Option<DocumentStatus>,
    pub image_url: Option<String>,
}
