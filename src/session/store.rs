//! Session persistence on the local filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs;

use crate::error::{Error, Result};
use crate::session::Session;

/// Reads and writes the session blob at a fixed path.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::try_exists(&self.path).await.unwrap_or(false)
    }

    /// Load the persisted session.
    pub async fn load(&self) -> Result<Session> {
        let content = fs::read_to_string(&self.path).await?;
        let session: Session = serde_json::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Corrupt session file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(session)
    }

    /// Persist `session`, replacing any previous file in one rename.
    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(session)?;
        let tmp_path = self.path.with_extension(format!("tmp-{}", session.id.simple()));
        fs::write(&tmp_path, content).await?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    /// When the persisted session was created, if there is one.
    pub async fn created_at(&self) -> Option<DateTime<Utc>> {
        self.load().await.ok().map(|s| s.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(!store.exists().await);

        let mut session = Session::new();
        session.authorization = Some("Bearer token".into());
        store.save(&session).await.unwrap();

        assert!(store.exists().await);
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, session);
        assert_eq!(store.created_at().await, Some(session.created_at));
    }

    #[tokio::test]
    async fn test_save_replaces_previous() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));

        let first = Session::new();
        store.save(&first).await.unwrap();
        let second = Session::renewed_from(&first);
        store.save(&second).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.id, second.id);

        // No temp files left behind
        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_load_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = SessionStore::new(&path);
        assert!(matches!(store.load().await, Err(Error::Config(_))));
        assert!(store.created_at().await.is_none());
    }
}
