//! Repository trait abstracting the auth backend.

use async_trait::async_trait;

use crate::dto::{
    AuthSession, EmailUpdateRequest, EmailUpdateVerifyRequest, GoogleLoginRequest, LoginRequest,
    RefreshRequest, SendOtpRequest, VerifyOtpRequest,
};
use common::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Backend operations the use cases depend on.
///
/// Errors reported by the backend come back as `AppError::Request`;
/// transport failures as `AppError::Http`. Implementations never retry.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Ask the backend to email a code for `(email, role)`
    async fn send_otp(&self, request: SendOtpRequest) -> AppResult<()>;

    /// Confirm the code and create the account in one step
    async fn verify_otp(&self, request: VerifyOtpRequest) -> AppResult<AuthSession>;

    /// Email + password sign in
    async fn login(&self, request: LoginRequest) -> AppResult<AuthSession>;

    /// Exchange a Google credential for a session
    async fn google_login(&self, request: GoogleLoginRequest) -> AppResult<AuthSession>;

    /// Obtain a fresh access token
    async fn refresh(&self, request: RefreshRequest) -> AppResult<AuthSession>;

    /// Invalidate the session server-side
    async fn logout(&self, access_token: &str) -> AppResult<()>;

    /// Send a code to the new address of a signed-in user
    async fn request_email_update(
        &self,
        access_token: &str,
        request: EmailUpdateRequest,
    ) -> AppResult<()>;

    /// Confirm the code sent to the new address
    async fn verify_email_update(
        &self,
        access_token: &str,
        request: EmailUpdateVerifyRequest,
    ) -> AppResult<()>;
}
