//! Explicit session lifecycle: `init` on start, `set` after sign in, `clear` on sign out.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{token, Session, SessionStorage};
use crate::dto::AuthSession;
use common::AppResult;
use domain::{AuthUser, Role};

/// Holds the current session in memory and mirrors it to a [`SessionStorage`].
///
/// One instance per process, shared through `Arc` by whoever needs the
/// token or role.
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user_id", &self.read().as_ref().map(|s| s.user.id.clone()))
            .finish_non_exhaustive()
    }
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            storage,
            current: RwLock::new(None),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.current.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Hydrate from storage.
    ///
    /// An unreadable persisted session is discarded rather than failing
    /// startup; the user simply has to sign in again.
    pub async fn init(&self) -> AppResult<Option<Session>> {
        let loaded = match self.storage.load().await {
            Ok(session) => session,
            Err(e) => {
                warn!("discarding unreadable session: {}", e);
                self.storage.remove().await?;
                None
            }
        };

        match &loaded {
            Some(session) => info!(user_id = %session.user.id, "session restored"),
            None => debug!("no stored session"),
        }

        *self.write() = loaded.clone();
        Ok(loaded)
    }

    /// Make a fresh session current, then persist it.
    ///
    /// The backend has already issued the tokens, so a persistence failure
    /// only costs the session across restarts; it is logged, not returned.
    pub async fn set(&self, auth: AuthSession) -> Session {
        let session = Session::from_auth(auth, Utc::now());
        *self.write() = Some(session.clone());

        match self.storage.save(&session).await {
            Ok(()) => {
                debug!(user_id = %session.user.id, role = %session.user.role, "session stored")
            }
            Err(e) => warn!(user_id = %session.user.id, "session kept in memory only: {}", e),
        }
        session
    }

    /// Drop the session from memory and storage.
    pub async fn clear(&self) -> AppResult<()> {
        *self.write() = None;
        self.storage.remove().await?;
        info!("session cleared");
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.read().clone()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read().as_ref().and_then(|s| s.refresh_token.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read().as_ref().map(|s| s.user.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// True when the access token's `exp` is at or before `now`.
    /// Tokens without a readable `exp` are treated as not expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let Some(token) = self.access_token() else {
            return false;
        };

        match token::expires_at(&token) {
            Ok(Some(expiry)) => expiry <= now,
            Ok(None) => false,
            Err(e) => {
                debug!("access token is not a readable JWT: {}", e);
                false
            }
        }
    }

    /// Record a confirmed email change in the stored identity.
    pub async fn update_email(&self, email: &str) -> AppResult<()> {
        let Some(mut session) = self.current() else {
            return Ok(());
        };
        session.user.email = Some(email.to_string());

        self.storage.save(&session).await?;
        *self.write() = Some(session);
        Ok(())
    }
}
