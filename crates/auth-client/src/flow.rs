//! Signup flow: pending registration + OTP entry + the auth client.

use std::sync::Arc;

use tracing::info;

use crate::container::AuthClient;
use crate::otp::{InputKey, OtpEntry, OtpState};
use crate::session::Session;
use crate::usecases::RegistrationInput;
use common::AppResult;
use domain::{Email, Password, PendingRegistration, Role};

/// Drives one signup from "code sent" to "account created".
///
/// Dropping the flow discards the pending registration and the entry
/// state; nothing else needs tearing down.
#[derive(Debug)]
pub struct RegistrationFlow {
    client: Arc<AuthClient>,
    pending: PendingRegistration,
    entry: OtpEntry,
}

impl RegistrationFlow {
    /// Validate the signup form and send the first code.
    pub async fn start(
        client: Arc<AuthClient>,
        email: &str,
        full_name: &str,
        password: &str,
        role: Role,
    ) -> AppResult<Self> {
        let pending = PendingRegistration::new(
            Email::new(email)?,
            full_name,
            Password::new(password)?,
            role,
        )?;

        client.send_otp(pending.email().as_str(), role).await?;
        let entry = OtpEntry::new(client.config().otp);
        info!(email = %pending.email(), %role, "signup started");

        Ok(Self {
            client,
            pending,
            entry,
        })
    }

    pub fn pending(&self) -> &PendingRegistration {
        &self.pending
    }

    pub fn entry(&self) -> &OtpEntry {
        &self.entry
    }

    pub fn is_verified(&self) -> bool {
        self.entry.state() == OtpState::Verified
    }

    pub fn tick(&mut self) {
        self.entry.tick();
    }

    pub fn press(&mut self, key: InputKey) {
        self.entry.press(key);
    }

    pub fn type_text(&mut self, text: &str) {
        self.entry.type_text(text);
    }

    /// Verify the entered code and register the account.
    ///
    /// Any failure counts as a failed attempt; the third one locks entry
    /// until a resend.
    pub async fn submit(&mut self) -> AppResult<Session> {
        let code = self.entry.submit()?;

        let input = RegistrationInput {
            email: self.pending.email().as_str(),
            password: self.pending.password().expose(),
            otp: &code,
            full_name: self.pending.full_name(),
            role: self.pending.role(),
        };

        match self.client.verify_and_register(input).await {
            Ok(session) => {
                self.entry.verification_succeeded();
                Ok(session)
            }
            Err(e) => {
                self.entry.verification_failed();
                self.pending.set_attempts_used(self.entry.attempts());
                Err(e)
            }
        }
    }

    /// Request a new code once the countdown allows it.
    pub async fn resend(&mut self) -> AppResult<()> {
        self.entry.begin_resend()?;

        let result = self
            .client
            .resend_otp(self.pending.email().as_str(), self.pending.role())
            .await;

        match result {
            Ok(()) => {
                self.entry.resend_succeeded();
                self.pending.set_attempts_used(0);
                Ok(())
            }
            Err(e) => {
                self.entry.resend_failed();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::dto::AuthSession;
    use crate::repository::MockAuthRepository;
    use crate::session::{MemorySessionStorage, SessionStorage, SessionStore};
    use common::{AppError, AppResult};
    use domain::AuthUser;
    use mockall::Sequence;

    fn client(repo: MockAuthRepository) -> Arc<AuthClient> {
        Arc::new(AuthClient::new(
            Arc::new(repo),
            Arc::new(SessionStore::new(Arc::new(MemorySessionStorage::default()))),
            ClientConfig::default(),
        ))
    }

    async fn start(repo: MockAuthRepository) -> RegistrationFlow {
        RegistrationFlow::start(client(repo), "Lee@Example.com", "Lee Park", "Secret#123", Role::Candidate)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_form_sends_nothing() {
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp().times(0);

        let result =
            RegistrationFlow::start(client(repo), "lee@example.com", "Lee", "weak", Role::Candidate)
                .await;
        assert!(matches!(result, Err(e) if e.is_validation()));
    }

    #[tokio::test]
    async fn test_lockout_then_resend_then_success() {
        let mut seq = Sequence::new();
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_verify_otp()
            .times(3)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::request(400, "Invalid OTP")));
        repo.expect_send_otp()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        repo.expect_verify_otp()
            .withf(|req| req.otp == "424242" && req.email == "lee@example.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|req| {
                Ok(AuthSession {
                    access_token: "welcome".to_string(),
                    refresh_token: None,
                    user: AuthUser {
                        id: "new-user".to_string(),
                        role: req.role,
                        full_name: Some(req.full_name.clone()),
                        email: Some(req.email.clone()),
                    },
                })
            });

        let mut flow = start(repo).await;

        for _ in 0..3 {
            flow.type_text("123456");
            assert!(flow.submit().await.is_err());
        }
        assert_eq!(flow.entry().state(), OtpState::Locked);
        assert_eq!(flow.pending().attempts_used(), 3);
        assert!(flow.entry().input().code().is_none());

        // Resend stays closed until the countdown runs out
        assert!(flow.resend().await.unwrap_err().is_validation());
        for _ in 0..120 {
            flow.tick();
        }
        flow.resend().await.unwrap();
        assert_eq!(flow.entry().attempts(), 0);
        assert_eq!(flow.entry().seconds_left(), 120);
        assert_eq!(flow.pending().attempts_used(), 0);

        flow.type_text("424242");
        let session = flow.submit().await.unwrap();
        assert!(flow.is_verified());
        assert_eq!(session.user.role, Role::Candidate);
    }

    struct FullDiskStorage;

    #[async_trait::async_trait]
    impl SessionStorage for FullDiskStorage {
        async fn load(&self) -> AppResult<Option<Session>> {
            Ok(None)
        }

        async fn save(&self, _session: &Session) -> AppResult<()> {
            Err(AppError::storage("disk full"))
        }

        async fn remove(&self) -> AppResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_accepted_code_survives_storage_failure() {
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp().times(1).returning(|_| Ok(()));
        repo.expect_verify_otp().times(1).returning(|req| {
            Ok(AuthSession {
                access_token: "accepted".to_string(),
                refresh_token: None,
                user: AuthUser {
                    id: "u-9".to_string(),
                    role: req.role,
                    full_name: Some(req.full_name.clone()),
                    email: Some(req.email.clone()),
                },
            })
        });

        let client = Arc::new(AuthClient::new(
            Arc::new(repo),
            Arc::new(SessionStore::new(Arc::new(FullDiskStorage))),
            ClientConfig::default(),
        ));
        let mut flow =
            RegistrationFlow::start(client.clone(), "lee@example.com", "Lee Park", "Secret#123", Role::Candidate)
                .await
                .unwrap();

        flow.type_text("123456");
        let session = flow.submit().await.unwrap();

        assert_eq!(session.access_token, "accepted");
        assert!(flow.is_verified());
        assert_eq!(flow.entry().attempts(), 0);
        assert_eq!(flow.pending().attempts_used(), 0);
        assert_eq!(client.session().access_token().as_deref(), Some("accepted"));
    }

    #[tokio::test]
    async fn test_debug_output_hides_secrets() {
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp().returning(|_| Ok(()));

        let flow = start(repo).await;
        let rendered = format!("{:?}", flow);
        assert!(rendered.contains("RegistrationFlow"));
        assert!(!rendered.contains("Secret#123"));
    }

    #[tokio::test]
    async fn test_failed_resend_keeps_gate_open() {
        let mut repo = MockAuthRepository::new();
        let mut calls = 0;
        repo.expect_send_otp().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(())
            } else {
                Err(AppError::request(429, "Too many requests"))
            }
        });

        let mut flow = start(repo).await;
        for _ in 0..120 {
            flow.tick();
        }

        let err = flow.resend().await.unwrap_err();
        assert!(err.is_rate_limited());
        assert!(flow.entry().can_resend());
    }
}
