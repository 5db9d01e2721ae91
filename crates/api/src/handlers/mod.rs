//! Request handlers, one module per resource.

pub mod conversations;
pub mod documents;
pub mod found_documents;
pub mod lost_documents;
pub mod subscriptions;
pub mod translations;
pub mod user_settings;
pub mod users;
