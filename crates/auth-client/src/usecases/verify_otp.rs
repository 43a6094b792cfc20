//! Confirm a signup code and create the account.

use std::sync::Arc;

use tracing::info;

use crate::dto::{AuthSession, VerifyOtpRequest};
use crate::repository::AuthRepository;
use common::{AppError, AppResult};
use domain::{Email, OtpCode, Password, Role};

/// Raw signup input as typed by the user.
#[derive(Clone)]
pub struct RegistrationInput<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub otp: &'a str,
    pub full_name: &'a str,
    pub role: Role,
}

impl std::fmt::Debug for RegistrationInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationInput")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Verifies the code and registers the account in a single backend call.
///
/// Either the account exists and a session comes back, or nothing changed
/// on the client side.
pub struct VerifyOtp {
    repository: Arc<dyn AuthRepository>,
}

impl VerifyOtp {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self { repository }
    }

    /// Preconditions are checked in order and none of them touch the network:
    /// OTP present, full name present, email, password, OTP shape, role.
    pub async fn execute(&self, input: RegistrationInput<'_>) -> AppResult<AuthSession> {
        if input.otp.trim().is_empty() {
            return Err(AppError::validation("OTP is required"));
        }
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(AppError::validation("Full name is required"));
        }

        let email = Email::new(input.email)?;
        let password = Password::new(input.password)?;
        let otp = OtpCode::new(input.otp)?;
        input.role.ensure_self_registrable()?;

        let request = VerifyOtpRequest::new(&email, &otp, &password, full_name, input.role);
        let session = self.repository.verify_otp(request).await?;

        info!(user_id = %session.user.id, role = %session.user.role, "account registered");
        Ok(session)
    }
}
