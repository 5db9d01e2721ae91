//! Integration tests for the Postgres storage backend.
//!
//! Runs against a real database via `#[sqlx::test]`:
//! - Repository SQL (COALESCE patches, jsonb containment, cascade FKs)
//! - The transactional writes exposed through the `Storage` trait
//! - Unique constraint violations surfacing as database errors

use findmydoc_core::error::CoreError;
use findmydoc_core::lifecycle::{DocumentStatus, FoundDocumentStatus};
use findmydoc_db::models::chat::{CreateChat, MessageOrder};
use findmydoc_db::models::conversation::CreateConversation;
use findmydoc_db::models::document::{CreateDocument, UpdateDocument};
use findmydoc_db::models::found_document::CreateFoundDocument;
use findmydoc_db::models::lost_document::ReportLost;
use findmydoc_db::models::translation::{CreateTranslation, UpdateTranslation};
use findmydoc_db::models::user::CreateUser;
use findmydoc_db::models::user_settings::CreateUserSettings;
use findmydoc_db::repositories::{DocumentRepo, LostDocumentRepo, UserRepo};
use findmydoc_db::storage::{PgStorage, Storage, StorageError};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        password: "hunter22".to_string(),
        email: format!("{username}@example.com"),
        phone_number: "+258 84 000 0000".to_string(),
    }
}

fn new_document(user_id: i64, name: &str) -> CreateDocument {
    CreateDocument {
        user_id,
        doc_type: "id_card".to_string(),
        name: name.to_string(),
        document_number: format!("DOC-{name}"),
        description: Some("registered for safekeeping".to_string()),
        image_url: None,
    }
}

fn lost_report(document_id: i64) -> ReportLost {
    ReportLost {
        document_id,
        lost_at: None,
        lost_location: Some("Maputo".to_string()),
        description: "Lost near the central market".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test: User repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_fetch_user(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    assert_eq!(user.points, 0);
    assert_eq!(user.subscription_plan.as_str(), "free");

    let by_name = UserRepo::find_by_username(&pool, "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, user.id);

    assert!(UserRepo::find_by_username(&pool, "nobody")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_username_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let err = UserRepo::create(&pool, &new_user("alice"))
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(db_err
        .constraint()
        .is_some_and(|name| name.starts_with("uq_")));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_points_is_cumulative(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();

    UserRepo::add_points(&pool, user.id, 20).await.unwrap();
    let user = UserRepo::add_points(&pool, user.id, 30)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.points, 50);

    assert!(UserRepo::add_points(&pool, 9999, 5).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Test: Document repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_document_patch_keeps_omitted_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let doc = DocumentRepo::create(&pool, &new_document(user.id, "National ID"))
        .await
        .unwrap();
    assert_eq!(doc.status, DocumentStatus::Active);

    let patched = DocumentRepo::update(
        &pool,
        doc.id,
        &UpdateDocument {
            name: Some("Renewed National ID".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(patched.name, "Renewed National ID");
    assert_eq!(patched.document_number, doc.document_number);
    assert_eq!(patched.description, doc.description);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_listing_documents_is_scoped_to_owner(pool: PgPool) {
    let alice = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob")).await.unwrap();

    DocumentRepo::create(&pool, &new_document(alice.id, "ID"))
        .await
        .unwrap();
    DocumentRepo::create(&pool, &new_document(alice.id, "Passport"))
        .await
        .unwrap();
    DocumentRepo::create(&pool, &new_document(bob.id, "Licence"))
        .await
        .unwrap();

    let for_alice = DocumentRepo::list_by_user(&pool, alice.id).await.unwrap();
    assert_eq!(for_alice.len(), 2);
    assert!(for_alice.iter().all(|doc| doc.user_id == alice.id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_a_document_cascades_to_its_lost_report(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let doc = DocumentRepo::create(&pool, &new_document(user.id, "National ID"))
        .await
        .unwrap();

    let detail = storage
        .report_document_lost(lost_report(doc.id))
        .await
        .unwrap();

    assert!(DocumentRepo::delete(&pool, doc.id).await.unwrap());
    assert!(LostDocumentRepo::find_by_id(&pool, detail.report.id)
        .await
        .unwrap()
        .is_none());
    assert!(!DocumentRepo::delete(&pool, doc.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_document_for_unknown_owner_is_not_found(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());

    let err = storage
        .create_document(new_document(9999, "Orphan"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Core(CoreError::NotFound { entity: "User", .. })
    ));
}

// ---------------------------------------------------------------------------
// Test: Lost-report transition through the trait
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_report_lost_is_atomic(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let doc = DocumentRepo::create(&pool, &new_document(user.id, "National ID"))
        .await
        .unwrap();

    let detail = storage
        .report_document_lost(lost_report(doc.id))
        .await
        .unwrap();
    assert_eq!(detail.document.status, DocumentStatus::Lost);
    assert_eq!(detail.report.user_id, user.id);

    let report = LostDocumentRepo::find_by_document_id(&pool, doc.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(report.id, detail.report.id);

    // Second report conflicts and leaves exactly one row behind.
    let err = storage
        .report_document_lost(lost_report(doc.id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Core(CoreError::Conflict(_))));
    assert_eq!(storage.get_lost_documents().await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_status_patch_to_lost_is_rejected(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let doc = DocumentRepo::create(&pool, &new_document(user.id, "National ID"))
        .await
        .unwrap();

    let err = storage
        .update_document(
            doc.id,
            UpdateDocument {
                status: Some(DocumentStatus::Lost),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Core(CoreError::Validation(_))));

    let doc = storage.get_document(doc.id).await.unwrap().unwrap();
    assert_eq!(doc.status, DocumentStatus::Active);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_recovery_patch_keeps_the_historical_report(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let doc = DocumentRepo::create(&pool, &new_document(user.id, "National ID"))
        .await
        .unwrap();
    storage
        .report_document_lost(lost_report(doc.id))
        .await
        .unwrap();

    let recovered = storage
        .update_document(
            doc.id,
            UpdateDocument {
                status: Some(DocumentStatus::Active),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(recovered.status, DocumentStatus::Active);
    assert_eq!(storage.get_lost_documents().await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: Found reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_found_report_awards_points_in_the_same_transaction(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let finder = UserRepo::create(&pool, &new_user("bob")).await.unwrap();

    let report = storage
        .create_found_document(CreateFoundDocument {
            found_by: finder.id,
            found_location: "Beira".to_string(),
            document_type: "passport".to_string(),
            description: "Blue passport at the bus stop".to_string(),
            image_url: None,
            found_at: None,
            possible_matches: Some(vec![1, 2]),
        })
        .await
        .unwrap();
    assert_eq!(report.status, FoundDocumentStatus::Pending);
    assert_eq!(report.possible_matches.as_ref().unwrap().0, vec![1, 2]);

    let finder = storage.get_user(finder.id).await.unwrap().unwrap();
    assert_eq!(finder.points, 50);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_found_report_for_unknown_finder_rolls_back(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let err = storage
        .create_found_document(CreateFoundDocument {
            found_by: 9999,
            found_location: "Beira".to_string(),
            document_type: "passport".to_string(),
            description: "orphan report".to_string(),
            image_url: None,
            found_at: None,
            possible_matches: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Core(CoreError::NotFound { entity: "User", .. })
    ));
    assert!(storage.get_found_documents().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: Conversations and messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_jsonb_participant_lookup_and_last_message(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let alice = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob")).await.unwrap();
    let carol = UserRepo::create(&pool, &new_user("carol")).await.unwrap();

    let ab = storage
        .create_conversation(CreateConversation {
            participants: vec![alice.id, bob.id],
            document_id: None,
        })
        .await
        .unwrap();
    storage
        .create_conversation(CreateConversation {
            participants: vec![bob.id, carol.id],
            document_id: None,
        })
        .await
        .unwrap();

    storage
        .create_message(CreateChat {
            conversation_id: ab.id,
            sender_id: alice.id,
            text: Some("hello".to_string()),
            image_url: None,
            timestamp: None,
            read: None,
        })
        .await
        .unwrap();

    let for_alice = storage.conversations_by_user(alice.id).await.unwrap();
    assert_eq!(for_alice.len(), 1);
    assert_eq!(for_alice[0].id, ab.id);
    assert_eq!(for_alice[0].last_message.as_ref().unwrap().0.text, "hello");

    assert_eq!(storage.conversations_by_user(bob.id).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_messages_come_back_in_requested_order(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let alice = UserRepo::create(&pool, &new_user("alice")).await.unwrap();
    let bob = UserRepo::create(&pool, &new_user("bob")).await.unwrap();
    let conversation = storage
        .create_conversation(CreateConversation {
            participants: vec![alice.id, bob.id],
            document_id: None,
        })
        .await
        .unwrap();

    for text in ["one", "two", "three"] {
        storage
            .create_message(CreateChat {
                conversation_id: conversation.id,
                sender_id: alice.id,
                text: Some(text.to_string()),
                image_url: None,
                timestamp: None,
                read: None,
            })
            .await
            .unwrap();
    }

    let asc = storage
        .messages_by_conversation(conversation.id, MessageOrder::Asc)
        .await
        .unwrap();
    let texts: Vec<&str> = asc.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["one", "two", "three"]);

    let desc = storage
        .messages_by_conversation(conversation.id, MessageOrder::Desc)
        .await
        .unwrap();
    assert_eq!(desc.first().unwrap().text, "three");
}

// ---------------------------------------------------------------------------
// Test: Settings and translations
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_settings_row_defaults(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    let user = UserRepo::create(&pool, &new_user("alice")).await.unwrap();

    let settings = storage
        .create_user_settings(CreateUserSettings {
            user_id: user.id,
            language: None,
            notifications_enabled: None,
            dark_mode: None,
        })
        .await
        .unwrap();
    assert_eq!(settings.language, "en");
    assert!(settings.notifications_enabled);
    assert!(!settings.dark_mode);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_translation_update_by_key(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());
    storage
        .create_translation(CreateTranslation {
            key: "home.title".to_string(),
            en: "Find My Document".to_string(),
            pt: "Encontre Meu Documento".to_string(),
        })
        .await
        .unwrap();

    let patched = storage
        .update_translation(
            "home.title",
            UpdateTranslation {
                en: Some("Find My Docs".to_string()),
                pt: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.en, "Find My Docs");
    assert_eq!(patched.pt, "Encontre Meu Documento");

    let err = storage
        .update_translation("missing.key", UpdateTranslation::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StorageError::Core(CoreError::NotFoundByKey { .. })
    ));
}
