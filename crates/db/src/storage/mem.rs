//! In-memory [`Storage`] implementation.
//!
//! Rows live in slot vectors (index + 1 = id, ids never reused) behind a
//! single mutex, so every operation, including the multi-step writes, is
//! atomic under one lock hold. Used for demo mode and tests; contents are
//! lost on shutdown.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use findmydoc_core::error::CoreError;
use findmydoc_core::lifecycle::{self, DocumentStatus, SubscriptionPlan};
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
use crate::storage::{Storage, StorageResult};

/// Slot-vector table: `id = index + 1`, deletes leave a tombstone so ids
/// are never reused.
#[derive(Debug)]
struct Table<T> {
    rows: Vec<Option<T>>,
}

// Manual impl: the derive would require `T: Default` for no reason.
impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    fn new() -> Self {
        Self { rows: Vec::new() }
    }

    fn insert_with(&mut self, build: impl FnOnce(DbId) -> T) -> &T {
        let id = self.rows.len() as DbId + 1;
        self.rows.push(Some(build(id)));
        self.rows.last().and_then(|slot| slot.as_ref()).unwrap()
    }

    fn get(&self, id: DbId) -> Option<&T> {
        if id < 1 {
            return None;
        }
        self.rows.get(id as usize - 1).and_then(|slot| slot.as_ref())
    }

    fn get_mut(&mut self, id: DbId) -> Option<&mut T> {
        if id < 1 {
            return None;
        }
        self.rows
            .get_mut(id as usize - 1)
            .and_then(|slot| slot.as_mut())
    }

    fn remove(&mut self, id: DbId) -> bool {
        if id < 1 {
            return false;
        }
        match self.rows.get_mut(id as usize - 1) {
            Some(slot @ Some(_)) => {
                *slot = None;
                true
            }
            _ => false,
        }
    }

    fn iter(&self) -> impl Iterator<Item = &T> {
        self.rows.iter().filter_map(|slot| slot.as_ref())
    }
}

#[derive(Debug, Default)]
struct Inner {
    users: Table<User>,
    documents: Table<Document>,
    lost_documents: Table<LostDocument>,
    found_documents: Table<FoundDocument>,
    conversations: Table<Conversation>,
    chats: Table<Chat>,
    user_settings: Table<UserSettings>,
    translations: Table<Translation>,
}

/// Ephemeral storage backend.
pub struct MemStorage {
    inner: Mutex<Inner>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// A store pre-seeded with the demo account and its one document.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            let now = Utc::now();
            let demo = inner.users.insert_with(|id| User {
                id,
                username: "demo".to_string(),
                password: "demo123".to_string(),
                email: "demo@example.com".to_string(),
                phone_number: "+258 84 123 4567".to_string(),
                points: 25,
                subscription_plan: SubscriptionPlan::Free,
                subscription_end_date: None,
                created_at: now,
                updated_at: now,
            });
            let demo_id = demo.id;
            inner.documents.insert_with(|id| Document {
                id,
                user_id: demo_id,
                doc_type: "id_card".to_string(),
                name: "National ID Card".to_string(),
                document_number: "DEMO12345".to_string(),
                description: None,
                status: DocumentStatus::Active,
                image_url: None,
                lost_at: None,
                lost_location: None,
                created_at: now,
                updated_at: now,
            });
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned mutex means a writer panicked mid-mutation; the demo
        // store has no recovery story, so keep going with the data as-is.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Newest chat in a conversation by (timestamp, id).
fn latest_chat(inner: &Inner, conversation_id: DbId) -> Option<Chat> {
    inner
        .chats
        .iter()
        .filter(|chat| chat.conversation_id == conversation_id)
        .max_by_key(|chat| (chat.timestamp, chat.id))
        .cloned()
}

fn hydrate_lost_report(inner: &Inner, report: &LostDocument) -> StorageResult<LostDocumentDetail> {
    let document = inner
        .documents
        .get(report.document_id)
        .ok_or(CoreError::ReferentialIntegrity {
            entity: "LostDocument",
            id: report.id,
            missing: "Document",
        })?
        .clone();
    let user = inner
        .users
        .get(report.user_id)
        .ok_or(CoreError::ReferentialIntegrity {
            entity: "LostDocument",
            id: report.id,
            missing: "User",
        })?
        .clone();
    Ok(LostDocumentDetail {
        report: report.clone(),
        document,
        user,
    })
}

#[async_trait]
impl Storage for MemStorage {
    async fn health(&self) -> StorageResult<()> {
        Ok(())
    }

    // --- Users ---

    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(self.lock().users.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, input: CreateUser) -> StorageResult<User> {
        let mut inner = self.lock();
        if inner.users.iter().any(|user| user.username == input.username) {
            return Err(CoreError::Conflict(format!(
                "username {} is already taken",
                input.username
            ))
            .into());
        }
        let now = Utc::now();
        Ok(inner
            .users
            .insert_with(|id| User {
                id,
                username: input.username,
                password: input.password,
                email: input.email,
                phone_number: input.phone_number,
                points: 0,
                subscription_plan: SubscriptionPlan::Free,
                subscription_end_date: None,
                created_at: now,
                updated_at: now,
            })
            .clone())
    }

    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<User> {
        let mut inner = self.lock();
        let user = inner
            .users
            .get_mut(id)
            .ok_or(CoreError::NotFound { entity: "User", id })?;
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(phone_number) = input.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(points) = input.points {
            user.points = points;
        }
        if let Some(plan) = input.subscription_plan {
            user.subscription_plan = plan;
        }
        if let Some(end_date) = input.subscription_end_date {
            user.subscription_end_date = Some(end_date);
        }
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    // --- Documents ---

    async fn get_document(&self, id: DbId) -> StorageResult<Option<Document>> {
        Ok(self.lock().documents.get(id).cloned())
    }

    async fn documents_by_user(&self, user_id: DbId) -> StorageResult<Vec<Document>> {
        let inner = self.lock();
        let mut docs: Vec<Document> = inner
            .documents
            .iter()
            .filter(|doc| doc.user_id == user_id)
            .cloned()
            .collect();
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(docs)
    }

    async fn create_document(&self, input: CreateDocument) -> StorageResult<Document> {
        let mut inner = self.lock();

        // Stands in for the foreign key on documents.user_id.
        if inner.users.get(input.user_id).is_none() {
            return Err(CoreError::NotFound {
                entity: "User",
                id: input.user_id,
            }
            .into());
        }

        let now = Utc::now();
        Ok(inner
            .documents
            .insert_with(|id| Document {
                id,
                user_id: input.user_id,
                doc_type: input.doc_type,
                name: input.name,
                document_number: input.document_number,
                description: input.description,
                status: DocumentStatus::Active,
                image_url: input.image_url,
                lost_at: None,
                lost_location: None,
                created_at: now,
                updated_at: now,
            })
            .clone())
    }

    async fn update_document(
        &self,
        id: DbId,
        input: UpdateDocument,
    ) -> StorageResult<Option<Document>> {
        let mut inner = self.lock();
        let Some(current_status) = inner.documents.get(id).map(|doc| doc.status) else {
            return Ok(None);
        };
        lifecycle::validate_status_patch(current_status, input.status)?;

        let doc = inner.documents.get_mut(id).unwrap();
        if let Some(doc_type) = input.doc_type {
            doc.doc_type = doc_type;
        }
        if let Some(name) = input.name {
            doc.name = name;
        }
        if let Some(document_number) = input.document_number {
            doc.document_number = document_number;
        }
        if let Some(description) = input.description {
            doc.description = Some(description);
        }
        if let Some(status) = input.status {
            doc.status = status;
        }
        if let Some(image_url) = input.image_url {
            doc.image_url = Some(image_url);
        }
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete_document(&self, id: DbId) -> StorageResult<bool> {
        let mut inner = self.lock();
        let removed = inner.documents.remove(id);
        if removed {
            // Mirror the FK cascade: the lost report goes with its document.
            let stale: Vec<DbId> = inner
                .lost_documents
                .iter()
                .filter(|report| report.document_id == id)
                .map(|report| report.id)
                .collect();
            for report_id in stale {
                inner.lost_documents.remove(report_id);
            }
        }
        Ok(removed)
    }

    async fn report_document_lost(&self, input: ReportLost) -> StorageResult<LostDocumentDetail> {
        let mut inner = self.lock();

        let document = inner
            .documents
            .get(input.document_id)
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
        let owner_id = document.user_id;

        // Every check runs before the first write, so an error leaves the
        // store untouched, same as a rolled-back transaction.
        let user = inner
            .users
            .get(owner_id)
            .ok_or(CoreError::ReferentialIntegrity {
                entity: "Document",
                id: input.document_id,
                missing: "User",
            })?
            .clone();

        let now = Utc::now();
        let lost_at = input.lost_at.unwrap_or(now);

        let doc = inner.documents.get_mut(input.document_id).unwrap();
        doc.status = DocumentStatus::Lost;
        doc.lost_at = Some(lost_at);
        doc.lost_location = input.lost_location.clone();
        doc.updated_at = now;
        let document = doc.clone();

        let report = inner
            .lost_documents
            .insert_with(|id| LostDocument {
                id,
                document_id: document.id,
                user_id: owner_id,
                lost_at,
                lost_location: input.lost_location,
                description: input.description,
                created_at: now,
                updated_at: now,
            })
            .clone();

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
        let inner = self.lock();
        let mut reports: Vec<&LostDocument> = inner.lost_documents.iter().collect();
        reports.sort_by(|a, b| b.lost_at.cmp(&a.lost_at).then(b.id.cmp(&a.id)));
        reports
            .into_iter()
            .map(|report| hydrate_lost_report(&inner, report))
            .collect()
    }

    async fn get_lost_document(&self, id: DbId) -> StorageResult<Option<LostDocumentDetail>> {
        let inner = self.lock();
        match inner.lost_documents.get(id) {
            Some(report) => Ok(Some(hydrate_lost_report(&inner, report)?)),
            None => Ok(None),
        }
    }

    // --- Found reports ---

    async fn get_found_documents(&self) -> StorageResult<Vec<FoundDocument>> {
        let inner = self.lock();
        let mut reports: Vec<FoundDocument> = inner.found_documents.iter().cloned().collect();
        reports.sort_by(|a, b| b.found_at.cmp(&a.found_at).then(b.id.cmp(&a.id)));
        Ok(reports)
    }

    async fn get_found_document(&self, id: DbId) -> StorageResult<Option<FoundDocument>> {
        Ok(self.lock().found_documents.get(id).cloned())
    }

    async fn create_found_document(
        &self,
        input: CreateFoundDocument,
    ) -> StorageResult<FoundDocument> {
        let mut inner = self.lock();

        if inner.users.get(input.found_by).is_none() {
            return Err(CoreError::NotFound {
                entity: "User",
                id: input.found_by,
            }
            .into());
        }

        let has_matches = input
            .possible_matches
            .as_ref()
            .is_some_and(|m| !m.is_empty());
        let award = points::found_report_award(has_matches);

        let now = Utc::now();
        let report = inner
            .found_documents
            .insert_with(|id| FoundDocument {
                id,
                found_by: input.found_by,
                found_location: input.found_location,
                document_type: input.document_type,
                description: input.description,
                image_url: input.image_url,
                found_at: input.found_at.unwrap_or(now),
                status: findmydoc_core::lifecycle::FoundDocumentStatus::Pending,
                possible_matches: input.possible_matches.map(Json),
                created_at: now,
                updated_at: now,
            })
            .clone();

        let finder = inner.users.get_mut(report.found_by).unwrap();
        finder.points += award;
        finder.updated_at = now;

        tracing::info!(
            report_id = report.id,
            finder_id = report.found_by,
            award,
            "found report filed"
        );

        Ok(report)
    }

    // --- Conversations / messages ---

    async fn conversations_by_user(&self, user_id: DbId) -> StorageResult<Vec<Conversation>> {
        let inner = self.lock();
        let mut conversations: Vec<Conversation> = inner
            .conversations
            .iter()
            .filter(|conversation| conversation.has_participant(user_id))
            .cloned()
            .collect();
        for conversation in &mut conversations {
            conversation.last_message = latest_chat(&inner, conversation.id).map(Json);
        }
        conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)));
        Ok(conversations)
    }

    async fn get_conversation(&self, id: DbId) -> StorageResult<Option<Conversation>> {
        Ok(self.lock().conversations.get(id).cloned())
    }

    async fn create_conversation(&self, input: CreateConversation) -> StorageResult<Conversation> {
        let mut inner = self.lock();
        let now = Utc::now();
        Ok(inner
            .conversations
            .insert_with(|id| Conversation {
                id,
                participants: Json(input.participants),
                last_message: None,
                document_id: input.document_id,
                created_at: now,
                updated_at: now,
            })
            .clone())
    }

    async fn messages_by_conversation(
        &self,
        conversation_id: DbId,
        order: MessageOrder,
    ) -> StorageResult<Vec<Chat>> {
        let inner = self.lock();
        let mut messages: Vec<Chat> = inner
            .chats
            .iter()
            .filter(|chat| chat.conversation_id == conversation_id)
            .cloned()
            .collect();
        match order {
            MessageOrder::Asc => {
                messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)))
            }
            MessageOrder::Desc => {
                messages.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)))
            }
        }
        Ok(messages)
    }

    async fn create_message(&self, input: CreateChat) -> StorageResult<Chat> {
        let mut inner = self.lock();

        if inner.conversations.get(input.conversation_id).is_none() {
            return Err(CoreError::NotFound {
                entity: "Conversation",
                id: input.conversation_id,
            }
            .into());
        }

        let now = Utc::now();
        let message = inner
            .chats
            .insert_with(|id| Chat {
                id,
                conversation_id: input.conversation_id,
                sender_id: input.sender_id,
                text: input.text.unwrap_or_default(),
                image_url: input.image_url,
                timestamp: input.timestamp.unwrap_or(now),
                read: input.read.unwrap_or(false),
            })
            .clone();

        let conversation = inner.conversations.get_mut(message.conversation_id).unwrap();
        conversation.last_message = Some(Json(message.clone()));
        conversation.updated_at = now;

        Ok(message)
    }

    // --- User settings ---

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>> {
        Ok(self
            .lock()
            .user_settings
            .iter()
            .find(|settings| settings.user_id == user_id)
            .cloned())
    }

    async fn create_user_settings(&self, input: CreateUserSettings) -> StorageResult<UserSettings> {
        let mut inner = self.lock();
        if inner
            .user_settings
            .iter()
            .any(|settings| settings.user_id == input.user_id)
        {
            return Err(CoreError::Conflict(format!(
                "user {} already has settings",
                input.user_id
            ))
            .into());
        }
        let now = Utc::now();
        Ok(inner
            .user_settings
            .insert_with(|id| UserSettings {
                id,
                user_id: input.user_id,
                language: input.language.unwrap_or_else(|| "en".to_string()),
                notifications_enabled: input.notifications_enabled.unwrap_or(true),
                dark_mode: input.dark_mode.unwrap_or(false),
                created_at: now,
                updated_at: now,
            })
            .clone())
    }

    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings> {
        let mut inner = self.lock();
        let settings = inner
            .user_settings
            .rows
            .iter_mut()
            .filter_map(|slot| slot.as_mut())
            .find(|settings| settings.user_id == user_id)
            .ok_or(CoreError::NotFound {
                entity: "UserSettings",
                id: user_id,
            })?;
        if let Some(language) = input.language {
            settings.language = language;
        }
        if let Some(enabled) = input.notifications_enabled {
            settings.notifications_enabled = enabled;
        }
        if let Some(dark_mode) = input.dark_mode {
            settings.dark_mode = dark_mode;
        }
        settings.updated_at = Utc::now();
        Ok(settings.clone())
    }

    // --- Translations ---

    async fn list_translations(&self) -> StorageResult<Vec<Translation>> {
        let inner = self.lock();
        let mut translations: Vec<Translation> = inner.translations.iter().cloned().collect();
        translations.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(translations)
    }

    async fn get_translation(&self, key: &str) -> StorageResult<Option<Translation>> {
        Ok(self
            .lock()
            .translations
            .iter()
            .find(|translation| translation.key == key)
            .cloned())
    }

    async fn create_translation(&self, input: CreateTranslation) -> StorageResult<Translation> {
        let mut inner = self.lock();
        if inner
            .translations
            .iter()
            .any(|translation| translation.key == input.key)
        {
            return Err(
                CoreError::Conflict(format!("translation key {} already exists", input.key)).into(),
            );
        }
        let now = Utc::now();
        Ok(inner
            .translations
            .insert_with(|id| Translation {
                id,
                key: input.key,
                en: input.en,
                pt: input.pt,
                created_at: now,
                updated_at: now,
            })
            .clone())
    }

    async fn update_translation(
        &self,
        key: &str,
        input: UpdateTranslation,
    ) -> StorageResult<Translation> {
        let mut inner = self.lock();
        let translation = inner
            .translations
            .rows
            .iter_mut()
            .filter_map(|slot| slot.as_mut())
            .find(|translation| translation.key == key)
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "Translation",
                key: key.to_string(),
            })?;
        if let Some(en) = input.en {
            translation.en = en;
        }
        if let Some(pt) = input.pt {
            translation.pt = pt;
        }
        translation.updated_at = Utc::now();
        Ok(translation.clone())
    }
}
