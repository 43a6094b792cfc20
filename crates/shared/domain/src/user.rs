//! Authenticated user identity and roles.

use serde::{Deserialize, Serialize};

use crate::constants::{ROLE_ADMIN, ROLE_CANDIDATE, ROLE_RECRUITER};
use crate::error::{DomainError, DomainResult};

/// Portal roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidate,
    Recruiter,
    Admin,
}

impl Role {
    /// Only candidates and recruiters may sign up through the OTP flow
    pub fn can_self_register(&self) -> bool {
        matches!(self, Role::Candidate | Role::Recruiter)
    }

    /// Reject roles that cannot sign up on their own
    pub fn ensure_self_registrable(&self) -> DomainResult<()> {
        if self.can_self_register() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "Role {} cannot sign up",
                self
            )))
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => ROLE_CANDIDATE,
            Role::Recruiter => ROLE_RECRUITER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            ROLE_CANDIDATE => Ok(Role::Candidate),
            ROLE_RECRUITER => Ok(Role::Recruiter),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(DomainError::validation(format!("Unknown role: {}", other))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity returned by every successful authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Backend identifier (opaque to the client)
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthUser {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("Candidate".parse::<Role>().unwrap(), Role::Candidate);
        assert_eq!(" recruiter ".parse::<Role>().unwrap(), Role::Recruiter);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(Role::Candidate.ensure_self_registrable().is_ok());
        assert!(Role::Recruiter.ensure_self_registrable().is_ok());
        let err = Role::Admin.ensure_self_registrable().unwrap_err();
        assert_eq!(err.message(), "Role admin cannot sign up");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Recruiter).unwrap(),
            "\"recruiter\""
        );
    }

    #[test]
    fn test_display_name_fallbacks() {
        let mut user = AuthUser {
            id: "u-1".to_string(),
            role: Role::Candidate,
            full_name: None,
            email: None,
        };
        assert_eq!(user.display_name(), "u-1");

        user.email = Some("a@b.co".to_string());
        assert_eq!(user.display_name(), "a@b.co");

        user.full_name = Some("Ada".to_string());
        assert_eq!(user.display_name(), "Ada");
    }
}
