//! Entity model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts (with `validator` rules)
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod chat;
pub mod conversation;
pub mod document;
pub mod found_document;
pub mod lost_document;
pub mod translation;
pub mod user;
pub mod user_settings;
