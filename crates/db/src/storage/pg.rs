//! Postgres-backed [`Storage`] implementation.
//!
//! Single-step operations delegate straight to the repositories;
//! multi-step writes open a transaction so a partial failure can never
//! leave the document table and the lost-report table disagreeing.

use async_trait::async_trait;
use chrono::Utc;
use findmydoc_core::error::CoreError;
use findmydoc_core::lifecycle::{self, DocumentStatus};
use findmydoc_core::points;
use findmydoc_core::types::DbId;
use sqlx::types::Json;

use crate::models::chat::{Chat, CreateChat, MessageOrder};
use crate::models::conversation::{Conversation, CreateConversation};
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::models::found_document::{CreateFoundDocument, FoundDocument};
use crate::models::lost_document::{LostDocument, LostDocumentDetail, ReportLost};
use crate::models::translation::{CreateTranslation, Translation, UpdateTranslation};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::user_settings::{CreateUserSettings, UpdateUserSettings, UserSettings};
use crate::repositories::{
    ChatRepo, ConversationRepo, DocumentRepo, FoundDocumentRepo, LostDocumentRepo, TranslationRepo,
    UserRepo, UserSettingsRepo,
};
use crate::storage::{Storage, StorageError, StorageResult};
use crate::DbPool;

/// Production storage backend over a shared connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Attach the referenced document and owner to a lost report.
    ///
    /// The FK constraints make a dangling reference impossible through
    /// normal operation, but a report read concurrently with a cascade
    /// delete surfaces as a typed error rather than a panic.
    async fn hydrate_lost_report(
        &self,
        report: LostDocument,
    ) -> StorageResult<LostDocumentDetail> {
        let document = DocumentRepo::find_by_id(&self.pool, report.document_id)
            .await?
            .ok_or(CoreError::ReferentialIntegrity {
                entity: "LostDocument",
                id: report.id,
                missing: "Document",
            })?;
        let user = UserRepo::find_by_id(&self.pool, report.user_id)
            .await?
            .ok_or(CoreError::ReferentialIntegrity {
                entity: "LostDocument",
                id: report.id,
                missing: "User",
            })?;
        Ok(LostDocumentDetail {
            report,
            document,
            user,
        })
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn health(&self) -> StorageResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    // --- Users ---

    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn create_user(&self, input: CreateUser) -> StorageResult<User> {
        Ok(UserRepo::create(&self.pool, &input).await?)
    }

    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<User> {
        UserRepo::update(&self.pool, id, &input)
            .await?
            .ok_or_else(|| CoreError::NotFound { entity: "User", id }.into())
    }

    // --- Documents ---

    async fn get_document(&self, id: DbId) -> StorageResult<Option<Document>> {
        Ok(DocumentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn documents_by_user(&self, user_id: DbId) -> StorageResult<Vec<Document>> {
        Ok(DocumentRepo::list_by_user(&self.pool, user_id).await?)
    }

    async fn create_document(&self, input: CreateDocument) -> StorageResult<Document> {
        // An unknown owner surfaces as NotFound, not as an FK violation.
        UserRepo::find_by_id(&self.pool, input.user_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: input.user_id,
            })?;
        Ok(DocumentRepo::create(&self.pool, &input).await?)
    }

    async fn update_document(
        &self,
        id: DbId,
        input: UpdateDocument,
    ) -> StorageResult<Option<Document>> {
        let mut tx = self.pool.begin().await?;

        let Some(current) = DocumentRepo::find_by_id_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        lifecycle::validate_status_patch(current.status, input.status)?;

        let updated = DocumentRepo::update(&mut *tx, id, &input).await?;
        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_document(&self, id: DbId) -> StorageResult<bool> {
        Ok(DocumentRepo::delete(&self.pool, id).await?)
    }

    async fn report_document_lost(&self, input: ReportLost) -> StorageResult<LostDocumentDetail> {
        let mut tx = self.pool.begin().await?;

        let document = DocumentRepo::find_by_id_for_update(&mut *tx, input.document_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Document",
                id: input.document_id,
            })?;
        if document.status == DocumentStatus::Lost {
            return Err(CoreError::Conflict(format!(
                "document {} is already reported lost",
                document.id
            ))
            .into());
        }
        document.status.check_transition(DocumentStatus::Lost)?;

        let lost_at = input.lost_at.unwrap_or_else(Utc::now);
        let document = DocumentRepo::mark_lost(
            &mut *tx,
            document.id,
            lost_at,
            input.lost_location.as_deref(),
        )
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Document",
            id: input.document_id,
        })?;

        let report = LostDocumentRepo::insert(
            &mut *tx,
            document.id,
            document.user_id,
            lost_at,
            input.lost_location.as_deref(),
            &input.description,
        )
        .await?;

        let user = UserRepo::find_by_id(&mut *tx, document.user_id)
            .await?
            .ok_or(CoreError::ReferentialIntegrity {
                entity: "LostDocument",
                id: report.id,
                missing: "User",
            })?;

        tx.commit().await?;

        tracing::info!(
            document_id = document.id,
            report_id = report.id,
            "document reported lost"
        );

        Ok(LostDocumentDetail {
            report,
            document,
            user,
        })
    }

    // --- Lost reports ---

    async fn get_lost_documents(&self) -> StorageResult<Vec<LostDocumentDetail>> {
        let reports = LostDocumentRepo::list(&self.pool).await?;
        let mut details = Vec::with_capacity(reports.len());
        for report in reports {
            details.push(self.hydrate_lost_report(report).await?);
        }
        Ok(details)
    }

    async fn get_lost_document(&self, id: DbId) -> StorageResult<Option<LostDocumentDetail>> {
        match LostDocumentRepo::find_by_id(&self.pool, id).await? {
            Some(report) => Ok(Some(self.hydrate_lost_report(report).await?)),
            None => Ok(None),
        }
    }

    // --- Found reports ---

    async fn get_found_documents(&self) -> StorageResult<Vec<FoundDocument>> {
        Ok(FoundDocumentRepo::list(&self.pool).await?)
    }

    async fn get_found_document(&self, id: DbId) -> StorageResult<Option<FoundDocument>> {
        Ok(FoundDocumentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_found_document(
        &self,
        input: CreateFoundDocument,
    ) -> StorageResult<FoundDocument> {
        let mut tx = self.pool.begin().await?;

        let finder = UserRepo::find_by_id(&mut *tx, input.found_by)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: input.found_by,
            })?;

        let report = FoundDocumentRepo::create(&mut *tx, &input).await?;

        let has_matches = input
            .possible_matches
            .as_ref()
            .is_some_and(|m| !m.is_empty());
        let award = points::found_report_award(has_matches);
        UserRepo::add_points(&mut *tx, finder.id, award)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "User",
                id: finder.id,
            })?;

        tx.commit().await?;

        tracing::info!(
            report_id = report.id,
            finder_id = finder.id,
            award,
            "found report filed"
        );

        Ok(report)
    }

    // --- Conversations / messages ---

    async fn conversations_by_user(&self, user_id: DbId) -> StorageResult<Vec<Conversation>> {
        let mut conversations = ConversationRepo::list_by_participant(&self.pool, user_id).await?;
        // Recompute last_message from the chats table rather than trusting
        // the denormalized copy.
        for conversation in &mut conversations {
            let latest = ChatRepo::latest_for_conversation(&self.pool, conversation.id).await?;
            conversation.last_message = latest.map(Json);
        }
        Ok(conversations)
    }

    async fn get_conversation(&self, id: DbId) -> StorageResult<Option<Conversation>> {
        Ok(ConversationRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_conversation(&self, input: CreateConversation) -> StorageResult<Conversation> {
        Ok(ConversationRepo::create(&self.pool, &input).await?)
    }

    async fn messages_by_conversation(
        &self,
        conversation_id: DbId,
        order: MessageOrder,
    ) -> StorageResult<Vec<Chat>> {
        Ok(ChatRepo::list_by_conversation(&self.pool, conversation_id, order).await?)
    }

    async fn create_message(&self, input: CreateChat) -> StorageResult<Chat> {
        let mut tx = self.pool.begin().await?;

        let conversation = ConversationRepo::find_by_id(&mut *tx, input.conversation_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Conversation",
                id: input.conversation_id,
            })?;

        let message = ChatRepo::create(&mut *tx, &input).await?;
        ConversationRepo::set_last_message(&mut *tx, conversation.id, &message).await?;

        tx.commit().await?;
        Ok(message)
    }

    // --- User settings ---

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>> {
        Ok(UserSettingsRepo::find_by_user_id(&self.pool, user_id).await?)
    }

    async fn create_user_settings(&self, input: CreateUserSettings) -> StorageResult<UserSettings> {
        Ok(UserSettingsRepo::create(&self.pool, &input).await?)
    }

    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings> {
        UserSettingsRepo::update_by_user_id(&self.pool, user_id, &input)
            .await?
            .ok_or_else(|| {
                StorageError::from(CoreError::NotFound {
                    entity: "UserSettings",
                    id: user_id,
                })
            })
    }

    // --- Translations ---

    async fn list_translations(&self) -> StorageResult<Vec<Translation>> {
        Ok(TranslationRepo::list(&self.pool).await?)
    }

    async fn get_translation(&self, key: &str) -> StorageResult<Option<Translation>> {
        Ok(TranslationRepo::find_by_key(&self.pool, key).await?)
    }

    async fn create_translation(&self, input: CreateTranslation) -> StorageResult<Translation> {
        Ok(TranslationRepo::create(&self.pool, &input).await?)
    }

    async fn update_translation(
        &self,
        key: &str,
        input: UpdateTranslation,
    ) -> StorageResult<Translation> {
        TranslationRepo::update_by_key(&self.pool, key, &input)
            .await?
            .ok_or_else(|| {
                StorageError::from(CoreError::NotFoundByKey {
                    entity: "Translation",
                    key: key.to_string(),
                })
            })
    }
}
