//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{CursorError, DocumentError, FetchFailed, StoreError};

use hm_shared::utils::validation::ValidationErrors;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Fetch(#[from] FetchFailed),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Cursor(#[from] CursorError),
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation {
            message: errors.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_conversion() {
        let mut errors = ValidationErrors::new();
        errors.add_error("email", "Invalid email format", "INVALID_EMAIL");
        let err: DomainError = errors.into();
        match err {
            DomainError::Validation { message } => assert!(message.contains("email")),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_fetch_failed_is_transparent() {
        let err: DomainError = FetchFailed::new("listings", "timeout").into();
        assert_eq!(err.to_string(), "Could not fetch listings: timeout");
    }
}
