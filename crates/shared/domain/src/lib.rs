//! Domain layer - Core value objects and entities of the auth flow.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod constants;
pub mod email;
pub mod error;
pub mod otp;
pub mod password;
pub mod registration;
pub mod user;

pub use constants::*;
pub use email::Email;
pub use error::{DomainError, DomainResult};
pub use otp::OtpCode;
pub use password::Password;
pub use registration::PendingRegistration;
pub use user::{AuthUser, Role};
