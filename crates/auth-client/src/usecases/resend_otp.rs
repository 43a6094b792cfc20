//! Request a fresh signup code.

use std::sync::Arc;

use tracing::info;

use crate::dto::SendOtpRequest;
use crate::repository::AuthRepository;
use common::AppResult;
use domain::{Email, Role};

/// Same validation and delegation as [`super::SendOtp`].
///
/// Resetting the local attempt counter and countdown is the caller's job
/// (see [`crate::otp::OtpEntry::resend_succeeded`]).
pub struct ResendOtp {
    repository: Arc<dyn AuthRepository>,
}

impl ResendOtp {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, email: &str, role: Role) -> AppResult<()> {
        let email = Email::new(email)?;
        role.ensure_self_registrable()?;

        self.repository
            .send_otp(SendOtpRequest::new(&email, role))
            .await?;

        info!(email = %email, %role, "OTP re-sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAuthRepository;

    #[tokio::test]
    async fn test_resend_delegates_to_send_endpoint() {
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp()
            .withf(|req| req.email == "x@y.io" && req.role == Role::Candidate)
            .times(1)
            .returning(|_| Ok(()));

        let use_case = ResendOtp::new(Arc::new(repo));
        tokio_test::assert_ok!(use_case.execute("X@y.io", Role::Candidate).await);
    }

    #[tokio::test]
    async fn test_resend_requires_email() {
        let mut repo = MockAuthRepository::new();
        repo.expect_send_otp().times(0);

        let use_case = ResendOtp::new(Arc::new(repo));
        let err = use_case.execute("", Role::Candidate).await.unwrap_err();
        assert_eq!(err.user_message(), "Email is required");
    }
}
