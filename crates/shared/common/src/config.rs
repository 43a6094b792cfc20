//! Shared configuration structures.

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain::{MAX_OTP_ATTEMPTS, OTP_TTL_SECONDS};

/// Backend HTTP connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct HttpClientConfig {
    /// API base URL (e.g., "http://localhost:5000/api")
    #[validate(url(message = "API base URL must be a valid URL"))]
    pub base_url: String,
    /// Connection timeout in milliseconds
    #[validate(range(min = 1, message = "Connect timeout must be positive"))]
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    #[validate(range(min = 1, message = "Request timeout must be positive"))]
    pub request_timeout_ms: u64,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            connect_timeout_ms: 5000,
            request_timeout_ms: 30000,
        }
    }
}

/// OTP entry behaviour.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Validate)]
pub struct OtpConfig {
    /// Countdown length before resend unlocks
    #[validate(range(min = 1, max = 3600, message = "OTP TTL must be between 1 and 3600 seconds"))]
    pub ttl_seconds: u32,
    /// Failed verifications before the input locks
    #[validate(range(min = 1, max = 10, message = "OTP attempts must be between 1 and 10"))]
    pub max_attempts: u32,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: OTP_TTL_SECONDS,
            max_attempts: MAX_OTP_ATTEMPTS,
        }
    }
}

/// Third-party sign-in configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OAuthConfig {
    pub google_client_id: Option<String>,
    pub linkedin_client_id: Option<String>,
    #[validate(url(message = "LinkedIn redirect URI must be a valid URL"))]
    pub linkedin_redirect_uri: Option<String>,
    pub linkedin_scope: String,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google_client_id: None,
            linkedin_client_id: None,
            linkedin_redirect_uri: None,
            linkedin_scope: "openid profile email".to_string(),
        }
    }
}

/// Where the session is persisted between runs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: ".recruit-auth/session.json".to_string(),
        }
    }
}
