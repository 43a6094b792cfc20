//! Unified error handling for the auth client.
//!
//! Two families matter to callers:
//! - validation errors, raised locally before any request is sent
//! - request errors, reported by the backend or the transport
//!
//! Every variant carries a message fit for the end user via
//! [`AppError::user_message`].

use domain::DomainError;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Local validation
    #[error("{0}")]
    Validation(String),

    // Backend answered with a non-success status
    #[error("{message}")]
    Request { status: u16, message: String },

    // Session
    #[error("Authentication required")]
    Unauthorized,

    // External service errors
    #[cfg(feature = "http")]
    #[error("Network error")]
    Http(#[from] reqwest::Error),

    #[cfg(feature = "jwt")]
    #[error("Token error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Session storage error: {0}")]
    Storage(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and programmatic checks
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Request { .. } => "REQUEST_ERROR",
            AppError::Unauthorized => "UNAUTHORIZED",
            #[cfg(feature = "http")]
            AppError::Http(_) => "NETWORK_ERROR",
            #[cfg(feature = "jwt")]
            AppError::Jwt(_) => "TOKEN_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Request { message, .. } => message.clone(),
            AppError::Unauthorized => "Please sign in to continue".to_string(),

            #[cfg(feature = "http")]
            AppError::Http(e) => {
                tracing::warn!("HTTP transport error: {:?}", e);
                if e.is_timeout() {
                    "The server took too long to respond. Please try again.".to_string()
                } else {
                    "Could not reach the server. Check your connection and try again.".to_string()
                }
            }
            #[cfg(feature = "jwt")]
            AppError::Jwt(e) => {
                tracing::warn!("Token error: {:?}", e);
                "Your session is invalid. Please sign in again.".to_string()
            }
            AppError::Storage(msg) => {
                tracing::error!("Session storage error: {}", msg);
                "Could not save your session".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An unexpected error occurred".to_string()
            }
        }
    }

    /// Raised locally, never reached the network
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// Backend refused the request because of rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::Request { status: 429, .. })
    }

    /// HTTP status reported by the backend, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Request { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
            DomainError::Password(msg) => AppError::Validation(msg),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(format_validation_errors(&errors))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn request(status: u16, message: impl Into<String>) -> Self {
        AppError::Request {
            status,
            message: message.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
