//! Wire records exchanged with the auth backend.
//!
//! Outgoing records are built from validated domain values only, so a
//! request body can never carry an unnormalized email or an unchecked
//! password. Incoming records are mapped into domain types before they
//! leave the repository layer.

use serde::{Deserialize, Serialize};

use domain::{AuthUser, Email, OtpCode, Password, Role};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendOtpRequest {
    pub email: String,
    pub role: Role,
}

impl SendOtpRequest {
    pub fn new(email: &Email, role: Role) -> Self {
        Self {
            email: email.as_str().to_string(),
            role,
        }
    }
}

#[derive(Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

impl VerifyOtpRequest {
    pub fn new(email: &Email, otp: &OtpCode, password: &Password, full_name: &str, role: Role) -> Self {
        Self {
            email: email.as_str().to_string(),
            otp: otp.as_str().to_string(),
            password: password.expose().to_string(),
            full_name: full_name.to_string(),
            role,
        }
    }
}

impl std::fmt::Debug for VerifyOtpRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyOtpRequest")
            .field("email", &self.email)
            .field("otp", &"[REDACTED]")
            .field("password", &"[REDACTED]")
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Google Identity Services credential exchange.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoogleLoginRequest {
    pub token: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailUpdateRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailUpdateVerifyRequest {
    pub email: String,
    pub otp: String,
}

/// Body of every successful authentication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: UserDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    #[serde(alias = "_id")]
    pub id: String,
    pub role: Role,
    #[serde(default, alias = "name")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Error payload; the backend uses either `message` or `error`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBodyDto {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

/// Result of a successful authentication, as used by the rest of the crate.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

impl From<UserDto> for AuthUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            role: dto.role,
            full_name: dto.full_name.filter(|n| !n.trim().is_empty()),
            email: dto.email,
        }
    }
}

impl From<AuthResponseDto> for AuthSession {
    fn from(dto: AuthResponseDto) -> Self {
        Self {
            access_token: dto.access_token,
            refresh_token: dto.refresh_token,
            user: dto.user.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_request_uses_camel_case() {
        let request = VerifyOtpRequest::new(
            &Email::new("ada@lovelace.dev").unwrap(),
            &OtpCode::new("123456").unwrap(),
            &Password::new("Analytic#1").unwrap(),
            "Ada Lovelace",
            Role::Candidate,
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "email": "ada@lovelace.dev",
                "otp": "123456",
                "password": "Analytic#1",
                "fullName": "Ada Lovelace",
                "role": "candidate"
            })
        );
    }

    #[test]
    fn test_verify_request_debug_hides_secrets() {
        let request = VerifyOtpRequest::new(
            &Email::new("ada@lovelace.dev").unwrap(),
            &OtpCode::new("654321").unwrap(),
            &Password::new("Analytic#1").unwrap(),
            "Ada",
            Role::Candidate,
        );
        let debug = format!("{:?}", request);
        assert!(!debug.contains("654321"));
        assert!(!debug.contains("Analytic#1"));
    }

    #[test]
    fn test_auth_response_accepts_mongo_id() {
        let dto: AuthResponseDto = serde_json::from_value(json!({
            "accessToken": "tok",
            "user": { "_id": "65f0c0ffee", "role": "recruiter", "fullName": "Lin" }
        }))
        .unwrap();

        let session = AuthSession::from(dto);
        assert_eq!(session.user.id, "65f0c0ffee");
        assert_eq!(session.user.role, Role::Recruiter);
        assert_eq!(session.user.full_name.as_deref(), Some("Lin"));
        assert!(session.refresh_token.is_none());
    }

    #[test]
    fn test_refresh_request_omits_missing_token() {
        let value = serde_json::to_value(RefreshRequest {
            refresh_token: None,
        })
        .unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_error_body_prefers_message() {
        let body: ErrorBodyDto =
            serde_json::from_value(json!({ "message": "Invalid OTP", "error": "Bad Request" }))
                .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Invalid OTP"));

        let body: ErrorBodyDto = serde_json::from_value(json!({ "error": "  " })).unwrap();
        assert_eq!(body.into_message(), None);
    }
}
