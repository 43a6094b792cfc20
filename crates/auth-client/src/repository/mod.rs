//! Backend access.

mod auth_repository;
mod http_repository;

pub use auth_repository::AuthRepository;
pub use http_repository::HttpAuthRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use auth_repository::MockAuthRepository;
