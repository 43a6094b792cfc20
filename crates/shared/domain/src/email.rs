//! Email value object.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::EMAIL_PATTERN;
use crate::error::{DomainError, DomainResult};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A normalized (trimmed, lower-cased) email address.
///
/// Can only be obtained through [`Email::new`], so holding one means the
/// address already passed the shape check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validate and normalize a raw email string.
    ///
    /// # Errors
    /// `"Email is required"` for an empty input, `"Invalid email format"`
    /// when the normalized value does not look like `local@domain.tld`.
    pub fn new(raw: &str) -> DomainResult<Self> {
        if raw.is_empty() {
            return Err(DomainError::validation("Email is required"));
        }

        let normalized = raw.trim().to_lowercase();
        if !EMAIL_REGEX.is_match(&normalized) {
            return Err(DomainError::validation("Invalid email format"));
        }

        Ok(Self(normalized))
    }

    /// The normalized address.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the normalized address.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Email {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Email::new(s)
    }
}

impl TryFrom<&str> for Email {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Email::new(value)
    }
}

impl Serialize for Email {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Email {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Email::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = Email::new("  Foo@Bar.COM ").unwrap();
        assert_eq!(email.as_str(), "foo@bar.com");
    }

    #[test]
    fn test_empty_email_is_required() {
        let err = Email::new("").unwrap_err();
        assert_eq!(err, DomainError::validation("Email is required"));
    }

    #[test]
    fn test_whitespace_only_is_invalid_format() {
        let err = Email::new("   ").unwrap_err();
        assert_eq!(err.message(), "Invalid email format");
    }

    #[test]
    fn test_malformed_emails_rejected() {
        for raw in [
            "plainaddress",
            "@no-local.com",
            "no-domain@",
            "no-tld@domain",
            "two@@signs.com",
            "spa ce@domain.com",
            "user@domain.",
        ] {
            let err = Email::new(raw).unwrap_err();
            assert_eq!(err.message(), "Invalid email format", "input: {raw:?}");
        }
    }

    #[test]
    fn test_wellformed_emails_accepted() {
        for raw in ["a@b.co", "first.last+tag@sub.domain.io", "X@Y.Z"] {
            let email = Email::new(raw).unwrap();
            assert_eq!(email.as_str(), raw.trim().to_lowercase());
        }
    }

    #[test]
    fn test_parse_via_from_str() {
        let email: Email = "Recruiter@Example.com".parse().unwrap();
        assert_eq!(email.to_string(), "recruiter@example.com");
    }

    #[test]
    fn test_serde_round_trip_validates() {
        let email = Email::new("Dev@Example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        assert_eq!(json, "\"dev@example.com\"");

        let bad: Result<Email, _> = serde_json::from_str("\"not-an-email\"");
        assert!(bad.is_err());
    }
}
