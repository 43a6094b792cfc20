//! Third-party sign in: Google credential exchange and LinkedIn redirects.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dto::{AuthSession, GoogleLoginRequest};
use crate::repository::AuthRepository;
use common::{AppError, AppResult, OAuthConfig};
use domain::{Role, LINKEDIN_STATE_TTL_SECONDS};

const LINKEDIN_AUTHORIZATION_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";

/// Clock skew tolerated on a state timestamp from the future
const STATE_SKEW_MILLIS: i64 = 60_000;

// =============================================================================
// Google
// =============================================================================

/// Exchanges a Google Identity Services credential for a session.
pub struct GoogleLogin {
    repository: Arc<dyn AuthRepository>,
}

impl GoogleLogin {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, credential: &str, role: Role) -> AppResult<AuthSession> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(AppError::validation("Google credential is required"));
        }
        role.ensure_self_registrable()?;

        let session = self
            .repository
            .google_login(GoogleLoginRequest {
                token: credential.to_string(),
                role,
            })
            .await?;

        info!(user_id = %session.user.id, "signed in with Google");
        Ok(session)
    }
}

// =============================================================================
// LinkedIn
// =============================================================================

/// Payload carried through the LinkedIn redirect in the `state` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedInState {
    pub role: Role,
    /// Unix time in milliseconds when the redirect was built
    pub timestamp: i64,
}

impl LinkedInState {
    pub fn new(role: Role, now: DateTime<Utc>) -> Self {
        Self {
            role,
            timestamp: now.timestamp_millis(),
        }
    }

    /// Base64 of the JSON payload.
    pub fn encode(&self) -> AppResult<String> {
        let json = serde_json::to_vec(self)
            .map_err(|e| AppError::internal(format!("State serialization failed: {}", e)))?;
        Ok(STANDARD.encode(json))
    }

    pub fn decode(raw: &str) -> AppResult<Self> {
        let bytes = STANDARD
            .decode(raw.trim())
            .map_err(|_| AppError::validation("Invalid sign-in state"))?;
        serde_json::from_slice(&bytes).map_err(|_| AppError::validation("Invalid sign-in state"))
    }

    /// Reject states older than the allowed window.
    pub fn ensure_fresh(&self, now: DateTime<Utc>) -> AppResult<()> {
        let fresh = now
            .timestamp_millis()
            .checked_sub(self.timestamp)
            .is_some_and(|age| {
                (-STATE_SKEW_MILLIS..=LINKEDIN_STATE_TTL_SECONDS * 1000).contains(&age)
            });
        if !fresh {
            warn!(timestamp = self.timestamp, "stale LinkedIn state");
            return Err(AppError::validation(
                "Sign-in link expired. Please try again.",
            ));
        }
        Ok(())
    }
}

/// Query parameters LinkedIn appends to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInCallback {
    pub code: String,
    pub state: LinkedInState,
}

/// Builds the authorization-code redirect and reads the callback.
#[derive(Debug, Clone)]
pub struct LinkedInAuth {
    client_id: String,
    redirect_uri: String,
    scope: String,
}

impl LinkedInAuth {
    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
        }
    }

    pub fn from_config(config: &OAuthConfig) -> AppResult<Self> {
        match (&config.linkedin_client_id, &config.linkedin_redirect_uri) {
            (Some(client_id), Some(redirect_uri)) => Ok(Self::new(
                client_id.clone(),
                redirect_uri.clone(),
                config.linkedin_scope.clone(),
            )),
            _ => Err(AppError::validation("LinkedIn sign-in is not configured")),
        }
    }

    /// URL to send the browser to.
    pub fn authorization_url(&self, role: Role, now: DateTime<Utc>) -> AppResult<String> {
        role.ensure_self_registrable()?;
        let state = LinkedInState::new(role, now).encode()?;

        let url = Url::parse_with_params(
            LINKEDIN_AUTHORIZATION_URL,
            &[
                ("response_type", "code"),
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scope.as_str()),
                ("state", state.as_str()),
            ],
        )
        .map_err(|e| AppError::internal(format!("Authorization URL build failed: {}", e)))?;

        Ok(url.into())
    }

    /// Extract the code and a fresh state from the full callback URL.
    pub fn parse_callback(&self, callback_url: &str, now: DateTime<Utc>) -> AppResult<LinkedInCallback> {
        let url = Url::parse(callback_url.trim())
            .map_err(|_| AppError::validation("Invalid callback URL"))?;

        let mut code = None;
        let mut state = None;
        let mut error = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "code" => code = Some(value.into_owned()),
                "state" => state = Some(value.into_owned()),
                "error_description" => error = Some(value.into_owned()),
                "error" if error.is_none() => error = Some(value.into_owned()),
                _ => {}
            }
        }

        if let Some(error) = error {
            return Err(AppError::validation(format!("LinkedIn sign-in failed: {}", error)));
        }

        let code = code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::validation("Authorization code is missing"))?;
        let state = LinkedInState::decode(
            state
                .as_deref()
                .ok_or_else(|| AppError::validation("Invalid sign-in state"))?,
        )?;
        state.ensure_fresh(now)?;

        Ok(LinkedInCallback { code, state })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAuthRepository;
    use chrono::{Duration, TimeZone};
    use domain::AuthUser;

    fn linkedin() -> LinkedInAuth {
        LinkedInAuth::new("client-123", "https://app.example.com/auth/linkedin", "openid email")
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_authorization_url_carries_encoded_state() {
        let url = linkedin().authorization_url(Role::Recruiter, now()).unwrap();
        let parsed = Url::parse(&url).unwrap();

        assert_eq!(parsed.host_str(), Some("www.linkedin.com"));
        let pairs: std::collections::HashMap<_, _> = parsed.query_pairs().into_owned().collect();
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["client_id"], "client-123");
        assert_eq!(pairs["redirect_uri"], "https://app.example.com/auth/linkedin");
        assert_eq!(pairs["scope"], "openid email");

        let state = LinkedInState::decode(&pairs["state"]).unwrap();
        assert_eq!(state.role, Role::Recruiter);
        assert_eq!(state.timestamp, now().timestamp_millis());
    }

    #[test]
    fn test_callback_round_trip() {
        let state = LinkedInState::new(Role::Candidate, now()).encode().unwrap();
        let callback = Url::parse_with_params(
            "https://app.example.com/auth/linkedin",
            &[("code", "abc"), ("state", state.as_str())],
        )
        .unwrap();

        let parsed = linkedin()
            .parse_callback(callback.as_str(), now() + Duration::seconds(30))
            .unwrap();
        assert_eq!(parsed.code, "abc");
        assert_eq!(parsed.state.role, Role::Candidate);
    }

    #[test]
    fn test_stale_state_rejected() {
        let state = LinkedInState::new(Role::Candidate, now());
        let later = now() + Duration::seconds(LINKEDIN_STATE_TTL_SECONDS + 1);
        assert!(state.ensure_fresh(later).unwrap_err().is_validation());
    }

    #[test]
    fn test_extreme_state_timestamps_rejected() {
        for timestamp in [i64::MIN, i64::MAX] {
            let payload = format!(r#"{{"role":"candidate","timestamp":{}}}"#, timestamp);
            let callback = Url::parse_with_params(
                "https://app.example.com/auth/linkedin",
                &[("code", "abc"), ("state", STANDARD.encode(payload).as_str())],
            )
            .unwrap();

            let err = linkedin().parse_callback(callback.as_str(), now()).unwrap_err();
            assert_eq!(err.user_message(), "Sign-in link expired. Please try again.");
        }
    }

    #[test]
    fn test_state_within_skew_accepted() {
        let state = LinkedInState::new(Role::Candidate, now() + Duration::seconds(30));
        tokio_test::assert_ok!(state.ensure_fresh(now()));
    }

    #[test]
    fn test_provider_error_surfaced() {
        let err = linkedin()
            .parse_callback(
                "https://app.example.com/auth/linkedin?error=user_cancelled_login&error_description=The+user+cancelled",
                now(),
            )
            .unwrap_err();
        assert_eq!(err.user_message(), "LinkedIn sign-in failed: The user cancelled");
    }

    #[test]
    fn test_garbage_state_rejected() {
        assert!(LinkedInState::decode("%%%").is_err());
        assert!(LinkedInState::decode(&STANDARD.encode("not json")).is_err());
    }

    #[test]
    fn test_unconfigured_linkedin() {
        let err = LinkedInAuth::from_config(&OAuthConfig::default()).unwrap_err();
        assert_eq!(err.user_message(), "LinkedIn sign-in is not configured");
    }

    #[tokio::test]
    async fn test_google_login_forwards_credential() {
        let mut repo = MockAuthRepository::new();
        repo.expect_google_login()
            .withf(|req| req.token == "g-cred" && req.role == Role::Recruiter)
            .times(1)
            .returning(|req| {
                Ok(AuthSession {
                    access_token: "a".to_string(),
                    refresh_token: None,
                    user: AuthUser {
                        id: "g1".to_string(),
                        role: req.role,
                        full_name: None,
                        email: None,
                    },
                })
            });

        let session = GoogleLogin::new(Arc::new(repo))
            .execute(" g-cred ", Role::Recruiter)
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Recruiter);
    }

    #[tokio::test]
    async fn test_google_login_requires_credential() {
        let mut repo = MockAuthRepository::new();
        repo.expect_google_login().times(0);

        let err = GoogleLogin::new(Arc::new(repo))
            .execute("", Role::Candidate)
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }
}
