//! Application-layer operations, one per user-facing action.

mod email_update;
mod login;
mod oauth;
mod resend_otp;
mod send_otp;
mod verify_otp;

pub use email_update::{RequestEmailUpdate, VerifyEmailUpdate};
pub use login::Login;
pub use oauth::{GoogleLogin, LinkedInAuth, LinkedInCallback, LinkedInState};
pub use resend_otp::ResendOtp;
pub use send_otp::SendOtp;
pub use verify_otp::{RegistrationInput, VerifyOtp};
