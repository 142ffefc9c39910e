//! Owner directories and on-disk result checks.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::fs::naming::sanitize_path_component;

/// `<data_dir>/<owner>`
pub fn owner_directory(data_dir: &Path, owner: &str) -> Result<PathBuf> {
    Ok(data_dir.join(sanitize_path_component(owner)?))
}

/// Create a directory and its parents. Existing directories are fine.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path).await?;
    Ok(())
}

/// True when the directory has no entries or does not exist.
pub async fn is_dir_empty(path: &Path) -> Result<bool> {
    let mut entries = match tokio::fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e.into()),
    };
    Ok(entries.next_entry().await?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_owner_directory() {
        let path = owner_directory(Path::new("data"), "someone").unwrap();
        assert_eq!(path, PathBuf::from("data/someone"));
        assert!(owner_directory(Path::new("data"), "../etc").is_err());
    }

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("data").join("someone");

        ensure_dir(&dir).await.unwrap();
        ensure_dir(&dir).await.unwrap();
        assert!(dir.is_dir());
    }

    #[tokio::test]
    async fn test_is_dir_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(is_dir_empty(tmp.path()).await.unwrap());
        assert!(is_dir_empty(&tmp.path().join("missing")).await.unwrap());

        std::fs::write(tmp.path().join("file.jpg"), b"x").unwrap();
        assert!(!is_dir_empty(tmp.path()).await.unwrap());
    }
}
