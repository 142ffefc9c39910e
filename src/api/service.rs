//! Capabilities the fetcher needs from the remote service.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::media::MediaDescriptor;
use crate::session::Session;

/// Arguments of one credential login.
#[derive(Clone)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
    /// Fresh one-time code when two-factor is enabled.
    pub verification_code: Option<String>,
}

impl std::fmt::Debug for LoginArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginArgs")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("verification_code", &self.verification_code.is_some())
            .finish()
    }
}

/// Session-bearing side of the remote client.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Snapshot of the live session.
    async fn session(&self) -> Session;

    /// Replace the live session.
    async fn set_session(&self, session: Session);

    /// Credential login using the live session as context.
    async fn login(&self, args: &LoginArgs) -> Result<()>;

    /// Cheap authenticated read used as a liveness check.
    async fn timeline_feed(&self) -> Result<()>;
}

/// Content side of the remote client.
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Resolve a public shortcode to the media primary key.
    async fn media_pk_from_code(&self, code: &str) -> Result<u64>;

    async fn media_info(&self, pk: u64) -> Result<MediaDescriptor>;

    async fn photo_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>>;

    async fn video_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>>;

    async fn clip_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>>;

    async fn igtv_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>>;

    async fn album_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>>;
}
