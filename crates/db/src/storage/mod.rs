//! The storage façade: one trait, two interchangeable backends.
//!
//! [`PgStorage`] is the production backend; [`MemStorage`] serves demo
//! mode and tests. The backend is chosen once at process start and
//! injected as `Arc<dyn Storage>`, never reached through global state.

mod mem;
mod pg;

pub use mem::MemStorage;
pub use pg::PgStorage;

use async_trait::async_trait;
use findmydoc_core::error::CoreError;
use findmydoc_core::types::DbId;

use crate::models::chat::{Chat, CreateChat, MessageOrder};
use crate::models::conversation::{Conversation, CreateConversation};
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::models::found_document::{CreateFoundDocument, FoundDocument};
use crate::models::lost_document::{LostDocumentDetail, ReportLost};
use crate::models::translation::{CreateTranslation, Translation, UpdateTranslation};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::user_settings::{CreateUserSettings, UpdateUserSettings, UserSettings};

/// Error type shared by both backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A domain-level failure (not found, conflict, validation, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database failure from the Postgres backend.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Uniform CRUD/query façade over all entities.
///
/// Multi-step writes (the lost-report transition, found-report point
/// award, message send) are atomic within a single call: one transaction
/// on Postgres, one lock hold in memory.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Backend connectivity probe for the health endpoint.
    async fn health(&self) -> StorageResult<()>;

    // --- Users ---

    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    async fn create_user(&self, input: CreateUser) -> StorageResult<User>;
    /// Fails with [`CoreError::NotFound`] for an unknown id.
    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<User>;

    // --- Documents ---

    async fn get_document(&self, id: DbId) -> StorageResult<Option<Document>>;
    async fn documents_by_user(&self, user_id: DbId) -> StorageResult<Vec<Document>>;
    async fn create_document(&self, input: CreateDocument) -> StorageResult<Document>;
    /// Plain field patch; returns `None` for an unknown id. Status patches
    /// to `lost` are rejected, see [`Storage::report_document_lost`].
    async fn update_document(
        &self,
        id: DbId,
        input: UpdateDocument,
    ) -> StorageResult<Option<Document>>;
    /// Returns `true` if a row existed and was removed; an unknown id is
    /// `false`, never an error.
    async fn delete_document(&self, id: DbId) -> StorageResult<bool>;
    /// The single entry point for the `active -> lost` transition:
    /// atomically flips the document status and inserts exactly one lost
    /// report. A document that is already lost is a conflict.
    async fn report_document_lost(&self, input: ReportLost) -> StorageResult<LostDocumentDetail>;

    // --- Lost reports ---

    /// The lost feed, each entry joined with its document and owner. A
    /// dangling reference is a [`CoreError::ReferentialIntegrity`] error.
    async fn get_lost_documents(&self) -> StorageResult<Vec<LostDocumentDetail>>;
    async fn get_lost_document(&self, id: DbId) -> StorageResult<Option<LostDocumentDetail>>;

    // --- Found reports ---

    async fn get_found_documents(&self) -> StorageResult<Vec<FoundDocument>>;
    async fn get_found_document(&self, id: DbId) -> StorageResult<Option<FoundDocument>>;
    /// Inserts the report and awards the finder their points in the same
    /// atomic step.
    async fn create_found_document(
        &self,
        input: CreateFoundDocument,
    ) -> StorageResult<FoundDocument>;

    // --- Conversations / messages ---

    /// Every conversation the user takes part in, each carrying the
    /// newest message as `last_message`.
    async fn conversations_by_user(&self, user_id: DbId) -> StorageResult<Vec<Conversation>>;
    async fn get_conversation(&self, id: DbId) -> StorageResult<Option<Conversation>>;
    async fn create_conversation(&self, input: CreateConversation) -> StorageResult<Conversation>;
    async fn messages_by_conversation(
        &self,
        conversation_id: DbId,
        order: MessageOrder,
    ) -> StorageResult<Vec<Chat>>;
    /// Appends the message and refreshes the parent conversation's
    /// `last_message`/`updated_at` in the same atomic step.
    async fn create_message(&self, input: CreateChat) -> StorageResult<Chat>;

    // --- User settings ---

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>>;
    async fn create_user_settings(&self, input: CreateUserSettings) -> StorageResult<UserSettings>;
    /// Fails with [`CoreError::NotFound`] when the user has no settings row.
    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings>;

    // --- Translations ---

    async fn list_translations(&self) -> StorageResult<Vec<Translation>>;
    async fn get_translation(&self, key: &str) -> StorageResult<Option<Translation>>;
    async fn create_translation(&self, input: CreateTranslation) -> StorageResult<Translation>;
    /// Fails with [`CoreError::NotFoundByKey`] for an unknown key.
    async fn update_translation(
        &self,
        key: &str,
        input: UpdateTranslation,
    ) -> StorageResult<Translation>;
}
