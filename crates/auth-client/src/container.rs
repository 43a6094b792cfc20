//! Auth client container - one entry point over the use cases and the session.
//!
//! Use cases stay free of session side effects; this type is where a
//! successful authentication becomes the stored session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::config::ClientConfig;
use crate::dto::RefreshRequest;
use crate::repository::{AuthRepository, HttpAuthRepository};
use crate::session::{FileSessionStorage, Session, SessionStore};
use crate::usecases::{
    GoogleLogin, LinkedInAuth, Login, RegistrationInput, RequestEmailUpdate, ResendOtp, SendOtp,
    VerifyEmailUpdate, VerifyOtp,
};
use common::{AppError, AppResult};
use domain::Role;

pub struct AuthClient {
    repository: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
    config: ClientConfig,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("session", &self.session)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    pub fn new(
        repository: Arc<dyn AuthRepository>,
        session: Arc<SessionStore>,
        config: ClientConfig,
    ) -> Self {
        Self {
            repository,
            session,
            config,
        }
    }

    /// Wire the HTTP repository and file-backed session from configuration.
    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        config.validate()?;

        let repository = Arc::new(HttpAuthRepository::new(&config.http)?);
        let storage = Arc::new(FileSessionStorage::new(&config.session.path));
        let session = Arc::new(SessionStore::new(storage));

        Ok(Self::new(repository, session, config))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> Arc<SessionStore> {
        self.session.clone()
    }

    /// Hydrate the session store; call once at startup.
    pub async fn init(&self) -> AppResult<Option<Session>> {
        self.session.init().await
    }

    // =========================================================================
    // Registration
    // =========================================================================

    pub async fn send_otp(&self, email: &str, role: Role) -> AppResult<()> {
        SendOtp::new(self.repository.clone()).execute(email, role).await
    }

    pub async fn resend_otp(&self, email: &str, role: Role) -> AppResult<()> {
        ResendOtp::new(self.repository.clone())
            .execute(email, role)
            .await
    }

    /// Verify the code, create the account and store the resulting session.
    pub async fn verify_and_register(&self, input: RegistrationInput<'_>) -> AppResult<Session> {
        let auth = VerifyOtp::new(self.repository.clone())
            .execute(input)
            .await?;
        Ok(self.session.set(auth).await)
    }

    // =========================================================================
    // Sign in / out
    // =========================================================================

    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        let auth = Login::new(self.repository.clone())
            .execute(email, password)
            .await?;
        Ok(self.session.set(auth).await)
    }

    pub async fn google_login(&self, credential: &str, role: Role) -> AppResult<Session> {
        let auth = GoogleLogin::new(self.repository.clone())
            .execute(credential, role)
            .await?;
        Ok(self.session.set(auth).await)
    }

    pub fn linkedin(&self) -> AppResult<LinkedInAuth> {
        LinkedInAuth::from_config(&self.config.oauth)
    }

    /// Exchange the stored refresh token for a new session.
    ///
    /// A 401 from the backend means the session is dead; it is cleared.
    pub async fn refresh(&self) -> AppResult<Session> {
        if !self.session.is_authenticated() {
            return Err(AppError::Unauthorized);
        }

        let request = RefreshRequest {
            refresh_token: self.session.refresh_token(),
        };
        match self.repository.refresh(request).await {
            Ok(auth) => {
                info!("session refreshed");
                Ok(self.session.set(auth).await)
            }
            Err(e) if e.status() == Some(401) => {
                warn!("refresh rejected, clearing session");
                self.session.clear().await?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Refresh first when the access token has expired.
    pub async fn ensure_fresh(&self, now: DateTime<Utc>) -> AppResult<Session> {
        let current = self.session.current().ok_or(AppError::Unauthorized)?;
        if self.session.is_expired(now) {
            return self.refresh().await;
        }
        Ok(current)
    }

    /// Sign out. The local session is cleared even when the backend call
    /// fails; that failure is still returned.
    pub async fn logout(&self) -> AppResult<()> {
        let Some(token) = self.session.access_token() else {
            return Ok(());
        };

        let result = self.repository.logout(&token).await;
        if let Err(e) = &result {
            warn!("server-side logout failed: {}", e);
        }

        self.session.clear().await?;
        result
    }

    // =========================================================================
    // Account
    // =========================================================================

    pub async fn request_email_update(&self, new_email: &str) -> AppResult<()> {
        RequestEmailUpdate::new(self.repository.clone(), self.session.clone())
            .execute(new_email)
            .await
    }

    pub async fn verify_email_update(&self, new_email: &str, otp: &str) -> AppResult<()> {
        VerifyEmailUpdate::new(self.repository.clone(), self.session.clone())
            .execute(new_email, otp)
            .await
    }
}
