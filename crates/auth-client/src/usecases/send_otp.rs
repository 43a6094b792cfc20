//! Request a signup code.

use std::sync::Arc;

use tracing::info;

use crate::dto::SendOtpRequest;
use crate::repository::AuthRepository;
use common::AppResult;
use domain::{Email, Role};

/// Validates the address and asks the backend to email a code.
pub struct SendOtp {
    repository: Arc<dyn AuthRepository>,
}

impl SendOtp {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// Fails fast on a malformed email or a role that cannot sign up.
    /// Backend errors (rate limiting, delivery failure) are returned as-is.
    pub async fn execute(&self, email: &str, role: Role) -> AppResult<()> {
        let email = Email::new(email)?;
        role.ensure_self_registrable()?;

        self.repository
            .send_otp(SendOtpRequest::new(&email, role))
            .await?;

        info!(email = %email, %role, "OTP requested");
        Ok(())
    }
}
