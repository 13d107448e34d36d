use thiserror::Error;

use crate::catalog::EntityKind;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} not found: {key}")]
    NotFound { kind: EntityKind, key: String },
    #[error("{kind} already exists: {key}")]
    AlreadyExists { kind: EntityKind, key: String },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Store throttled the request: {0}")]
    Throttled(String),
    #[error("Store call timed out after {0} ms")]
    Timeout(u64),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
