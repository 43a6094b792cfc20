//! One-time code value object.

use crate::constants::OTP_LENGTH;
use crate::error::{DomainError, DomainResult};

/// A six-digit verification code.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OtpCode([REDACTED])")
    }
}

impl OtpCode {
    /// Parse a code, ignoring surrounding whitespace.
    pub fn new(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("OTP is required"));
        }

        if trimmed.len() != OTP_LENGTH || !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "OTP must be {} digits",
                OTP_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
