//! Resolve, download and verify one post.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::api::service::ContentService;
use crate::config::parse_identifier;
use crate::error::{Error, Result};
use crate::fetch::outcome::{FetchOutcome, FetchStatus};
use crate::fs::{ensure_dir, is_dir_empty, owner_directory};
use crate::media::DispatchTable;
use crate::retry::ResilientCaller;

/// Highest error count a caller may report before fetching stops.
pub const MAX_ERROR_COUNT: u32 = 3;

/// Fetches posts into `<data_dir>/<owner>`.
///
/// Fetches run one at a time. Two fetchers writing the same owner directory
/// can race on the emptiness check.
pub struct ContentFetcher {
    service: Arc<dyn ContentService>,
    caller: ResilientCaller,
    dispatch: DispatchTable,
    data_dir: PathBuf,
}

impl ContentFetcher {
    pub fn new(
        service: Arc<dyn ContentService>,
        caller: ResilientCaller,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            service,
            caller,
            dispatch: DispatchTable::default(),
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Fetch one post by shortcode or URL.
    pub async fn fetch(&self, identifier: &str) -> Result<FetchOutcome> {
        self.fetch_with_error_count(identifier, 0).await
    }

    /// Fetch with the caller's running error count for this identifier.
    ///
    /// A count above [`MAX_ERROR_COUNT`] fails with `TooManyErrors` before
    /// anything is resolved.
    pub async fn fetch_with_error_count(
        &self,
        identifier: &str,
        error_count: u32,
    ) -> Result<FetchOutcome> {
        self.caller
            .call("fetch", || self.attempt(identifier, error_count))
            .await
    }

    async fn attempt(&self, identifier: &str, error_count: u32) -> Result<FetchOutcome> {
        if error_count > MAX_ERROR_COUNT {
            tracing::error!(
                post = identifier,
                error_count,
                "Giving up on post after too many errors"
            );
            return Err(Error::TooManyErrors {
                identifier: identifier.to_string(),
                error_count,
            });
        }

        let code = parse_identifier(identifier)?;

        match self.process(&code).await {
            Err(e) if e.is_source_gone() => {
                tracing::warn!(post = %code, "Source not found: {}", e);
                Ok(FetchOutcome::source_not_found(code))
            }
            other => other,
        }
    }

    async fn process(&self, code: &str) -> Result<FetchOutcome> {
        let pk = self.service.media_pk_from_code(code).await?;
        let descriptor = self.service.media_info(pk).await?;
        tracing::debug!(
            post = code,
            pk,
            kind = descriptor.kind,
            subkind = ?descriptor.subkind,
            owner = %descriptor.owner,
            "Resolved post"
        );

        let folder = owner_directory(&self.data_dir, &descriptor.owner)?;
        ensure_dir(&folder).await?;

        let strategy = self
            .dispatch
            .lookup(descriptor.kind, descriptor.subkind.as_deref());

        let status = match strategy {
            Some(strategy) => {
                tracing::info!(post = code, "Running {} into {}", strategy, folder.display());
                let files = strategy
                    .run(self.service.as_ref(), descriptor.pk, &folder)
                    .await?;
                tracing::debug!(post = code, files = files.len(), "Strategy finished");

                if is_dir_empty(&folder).await? {
                    tracing::warn!(
                        post = code,
                        "{} finished but {} is empty",
                        strategy,
                        folder.display()
                    );
                    FetchStatus::Failed
                } else {
                    FetchStatus::Completed
                }
            }
            None => {
                tracing::warn!(
                    post = code,
                    kind = descriptor.kind,
                    subkind = ?descriptor.subkind,
                    "Media kind not supported"
                );
                FetchStatus::NotSupported
            }
        };

        Ok(FetchOutcome::new(
            code,
            descriptor.owner.as_str(),
            descriptor.content_type(),
            status,
        ))
    }
}
