//! Password value object - policy validation for new credentials.
//!
//! The raw value never leaves this type except through [`Password::expose`],
//! which only the wire layer calls.

use crate::constants::MIN_PASSWORD_LENGTH;
use crate::error::{DomainError, DomainResult};

/// A raw password that satisfied the signup policy.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    raw: String,
}

// Don't expose the raw value in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("raw", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Validate a candidate password against the policy.
    ///
    /// Rules are checked in order and the first failure is reported:
    /// required, at least [`MIN_PASSWORD_LENGTH`] characters, one uppercase
    /// letter, one lowercase letter, one digit, one special character.
    pub fn new(raw: &str) -> DomainResult<Self> {
        if raw.is_empty() {
            return Err(DomainError::password("Password is required"));
        }

        if raw.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::password(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::password(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(DomainError::password(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(DomainError::password(
                "Password must contain at least one number",
            ));
        }

        if raw.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::password(
                "Password must contain at least one special character",
            ));
        }

        Ok(Self {
            raw: raw.to_string(),
        })
    }

    /// The raw value, for building the outgoing request body.
    pub fn expose(&self) -> &str {
        &self.raw
    }
}
