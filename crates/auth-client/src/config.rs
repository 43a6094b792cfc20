//! Client configuration.

use std::env;

use validator::Validate;

use common::{AppResult, HttpClientConfig, OAuthConfig, OtpConfig, SessionConfig};

/// Everything the auth client needs to talk to the backend.
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub http: HttpClientConfig,
    pub otp: OtpConfig,
    pub oauth: OAuthConfig,
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let http_defaults = HttpClientConfig::default();
        let otp_defaults = OtpConfig::default();
        let oauth_defaults = OAuthConfig::default();

        Self {
            http: HttpClientConfig {
                base_url: env::var("API_BASE_URL").unwrap_or(http_defaults.base_url),
                connect_timeout_ms: env::var("API_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(http_defaults.connect_timeout_ms),
                request_timeout_ms: env::var("API_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(http_defaults.request_timeout_ms),
            },
            otp: OtpConfig {
                ttl_seconds: env::var("OTP_TTL_SECONDS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(otp_defaults.ttl_seconds),
                max_attempts: env::var("OTP_MAX_ATTEMPTS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(otp_defaults.max_attempts),
            },
            oauth: OAuthConfig {
                google_client_id: env::var("GOOGLE_CLIENT_ID").ok(),
                linkedin_client_id: env::var("LINKEDIN_CLIENT_ID").ok(),
                linkedin_redirect_uri: env::var("LINKEDIN_REDIRECT_URI").ok(),
                linkedin_scope: env::var("LINKEDIN_SCOPE").unwrap_or(oauth_defaults.linkedin_scope),
            },
            session: SessionConfig {
                path: env::var("SESSION_FILE").unwrap_or_else(|_| SessionConfig::default().path),
            },
        }
    }

    /// Check every section, reporting the first invalid one.
    pub fn validate(&self) -> AppResult<()> {
        self.http.validate()?;
        self.otp.validate()?;
        self.oauth.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ClientConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_section_reported_as_validation() {
        let mut config = ClientConfig::default();
        config.http.base_url = "localhost without scheme".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "API base URL must be a valid URL");
    }
}
