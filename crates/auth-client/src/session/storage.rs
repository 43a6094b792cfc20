//! Where a session is persisted between runs.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use super::Session;
use common::{AppError, AppResult};

/// Persistence backend for [`super::SessionStore`].
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Read the persisted session, if any
    async fn load(&self) -> AppResult<Option<Session>>;

    /// Replace the persisted session
    async fn save(&self, session: &Session) -> AppResult<()>;

    /// Forget the persisted session; removing nothing is not an error
    async fn remove(&self) -> AppResult<()>;
}

/// JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> AppError {
    AppError::storage(format!("{} {}: {}", action, path.display(), e))
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn load(&self) -> AppResult<Option<Session>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read", &self.path, e)),
        };

        let session = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::storage(format!("parse {}: {}", self.path.display(), e))
        })?;
        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("create", parent, e))?;
        }

        let json = serde_json::to_vec_pretty(session)
            .map_err(|e| AppError::internal(format!("Session serialization failed: {}", e)))?;

        // Write then rename so a crash never leaves a half-written file
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error("write", &tmp, e))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| io_error("rename", &self.path, e))?;

        debug!("session saved to {}", self.path.display());
        Ok(())
    }

    async fn remove(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error("remove", &self.path, e)),
        }
    }
}

/// Process-local storage, for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: Mutex<Option<Session>>,
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> AppResult<Option<Session>> {
        let guard = self
            .session
            .lock()
            .map_err(|_| AppError::storage("session lock poisoned"))?;
        Ok(guard.clone())
    }

    async fn save(&self, session: &Session) -> AppResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| AppError::storage("session lock poisoned"))?;
        *guard = Some(session.clone());
        Ok(())
    }

    async fn remove(&self) -> AppResult<()> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| AppError::storage("session lock poisoned"))?;
        *guard = None;
        Ok(())
    }
}
