//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept a `PgExecutor` as the first argument, so the same method
//! runs against the pool or inside a transaction.

pub mod chat_repo;
pub mod conversation_repo;
pub mod document_repo;
pub mod found_document_repo;
pub mod lost_document_repo;
pub mod translation_repo;
pub mod user_repo;
pub mod user_settings_repo;

pub use chat_repo::ChatRepo;
pub use conversation_repo::ConversationRepo;
pub use document_repo::DocumentRepo;
pub use found_document_repo::FoundDocumentRepo;
pub use lost_document_repo::LostDocumentRepo;
pub use translation_repo::TranslationRepo;
pub use user_repo::UserRepo;
pub use user_settings_repo::UserSettingsRepo;
