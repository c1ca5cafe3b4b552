//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A record was not found.
    #[error("{0}")]
    NotFound(String),

    /// One or more validation rules failed. The message is the sorted,
    /// comma-joined list of violations.
    #[error("{0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
