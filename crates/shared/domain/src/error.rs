//! Domain-level errors.
//!
//! These errors represent business rule violations.
//! They are independent of infrastructure concerns (HTTP, storage).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("{0}")]
    Validation(String),

    /// Password policy violation
    #[error("{0}")]
    Password(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password error
    pub fn password(msg: impl Into<String>) -> Self {
        DomainError::Password(msg.into())
    }

    /// Message shown to the user
    pub fn message(&self) -> &str {
        match self {
            DomainError::Validation(msg) | DomainError::Password(msg) => msg,
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
