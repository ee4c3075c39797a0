// src/domain/errors.rs
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures raised by entity descriptors, changesets and repositories.
///
/// Storage adapters translate driver errors into these: unique violations
/// become `Conflict`, dangling references `NotFound`, check and not-null
/// violations `Validation`.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed input: unknown column, uncastable value, bad operator.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// Storage failure; the message is for logs, not for callers.
    #[error("persistence error: {0}")]
    Persistence(String),
}
