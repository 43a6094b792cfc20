//! Session persistence.

mod storage;
mod store;
pub mod token;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dto::AuthSession;
use domain::AuthUser;

pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
pub use store::SessionStore;

/// Persisted form of an authenticated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn from_auth(auth: AuthSession, created_at: DateTime<Utc>) -> Self {
        Self {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
            user: auth.user,
            created_at,
        }
    }
}

// Tokens stay out of logs
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("created_at", &self.created_at)
            .finish()
    }
}
