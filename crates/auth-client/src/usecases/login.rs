//! Email + password sign in.

use std::sync::Arc;

use tracing::info;

use crate::dto::{AuthSession, LoginRequest};
use crate::repository::AuthRepository;
use common::{AppError, AppResult};
use domain::Email;

pub struct Login {
    repository: Arc<dyn AuthRepository>,
}

impl Login {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// The password policy is not applied here: accounts created under an
    /// older policy must still be able to sign in.
    pub async fn execute(&self, email: &str, password: &str) -> AppResult<AuthSession> {
        let email = Email::new(email)?;
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let session = self
            .repository
            .login(LoginRequest {
                email: email.into_string(),
                password: password.to_string(),
            })
            .await?;

        info!(user_id = %session.user.id, role = %session.user.role, "signed in");
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAuthRepository;
    use domain::{AuthUser, Role};

    #[tokio::test]
    async fn test_login_with_legacy_password() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login()
            .withf(|req| req.email == "old@timer.org" && req.password == "short")
            .returning(|_| {
                Ok(AuthSession {
                    access_token: "t".to_string(),
                    refresh_token: Some("r".to_string()),
                    user: AuthUser {
                        id: "42".to_string(),
                        role: Role::Admin,
                        full_name: None,
                        email: None,
                    },
                })
            });

        let session = Login::new(Arc::new(repo))
            .execute("Old@Timer.org", "short")
            .await
            .unwrap();
        assert_eq!(session.user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_empty_password_rejected() {
        let mut repo = MockAuthRepository::new();
        repo.expect_login().times(0);

        let err = Login::new(Arc::new(repo))
            .execute("a@b.co", "")
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Password is required");
    }
}
