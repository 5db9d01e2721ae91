use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with key {key}")]
    NotFoundByKey { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A joined read found a row whose foreign key points at nothing.
    ///
    /// Surfaced instead of an opaque panic so the HTTP layer can log the
    /// exact dangling reference before returning a 500.
    #[error("Referential integrity violation: {entity} {id} references a missing {missing}")]
    ReferentialIntegrity {
        entity: &'static str,
        id: DbId,
        missing: &'static str,
    },
}
