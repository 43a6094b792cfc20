//! Auth Client Library
//!
//! Typed client for the recruiting portal's authentication backend:
//! OTP signup, sign in (password, Google, LinkedIn), session lifecycle
//! and email changes.

pub mod config;
pub mod container;
pub mod dto;
pub mod flow;
pub mod otp;
pub mod repository;
pub mod session;
pub mod usecases;

pub use config::ClientConfig;
pub use container::AuthClient;
pub use dto::AuthSession;
pub use flow::RegistrationFlow;
pub use session::{Session, SessionStore};
