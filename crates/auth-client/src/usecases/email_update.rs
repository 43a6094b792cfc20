//! Change the email of a signed-in user, confirmed by a code sent to the new address.

use std::sync::Arc;

use tracing::info;

use crate::dto::{EmailUpdateRequest, EmailUpdateVerifyRequest};
use crate::repository::AuthRepository;
use crate::session::SessionStore;
use common::{AppError, AppResult};
use domain::{Email, OtpCode};

pub struct RequestEmailUpdate {
    repository: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
}

impl RequestEmailUpdate {
    pub fn new(repository: Arc<dyn AuthRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
        }
    }

    pub async fn execute(&self, new_email: &str) -> AppResult<()> {
        let email = Email::new(new_email)?;
        let token = self.session.access_token().ok_or(AppError::Unauthorized)?;

        self.repository
            .request_email_update(
                &token,
                EmailUpdateRequest {
                    email: email.as_str().to_string(),
                },
            )
            .await?;

        info!(email = %email, "email change code requested");
        Ok(())
    }
}

/// Confirms the change against the dedicated verify endpoint.
pub struct VerifyEmailUpdate {
    repository: Arc<dyn AuthRepository>,
    session: Arc<SessionStore>,
}

impl VerifyEmailUpdate {
    pub fn new(repository: Arc<dyn AuthRepository>, session: Arc<SessionStore>) -> Self {
        Self {
            repository,
            session,
        }
    }

    pub async fn execute(&self, new_email: &str, otp: &str) -> AppResult<()> {
        let email = Email::new(new_email)?;
        let otp = OtpCode::new(otp)?;
        let token = self.session.access_token().ok_or(AppError::Unauthorized)?;

        self.repository
            .verify_email_update(
                &token,
                EmailUpdateVerifyRequest {
                    email: email.as_str().to_string(),
                    otp: otp.as_str().to_string(),
                },
            )
            .await?;

        self.session.update_email(email.as_str()).await?;
        info!(email = %email, "email changed");
        Ok(())
    }
}
