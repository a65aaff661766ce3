//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflicting concurrent update: {0}")]
    Conflict(String),

    #[error("Store failure: {0}")]
    Store(#[from] StoreError),
}

/// Store-level errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Version conflict: record changed since read")]
    VersionConflict,

    #[error("Record already exists")]
    Duplicate,

    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),
}
