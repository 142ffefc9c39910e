//! (kind, sub-kind) → download strategy.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::api::service::ContentService;
use crate::error::Result;
use crate::media::item::MediaKind;

/// Sub-kind used for kinds that do not distinguish sub-kinds.
pub const ANY_SUBKIND: &str = "any";

/// One of the five download strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadStrategy {
    Photo,
    Video,
    Clip,
    Igtv,
    Album,
}

impl DownloadStrategy {
    /// Run the strategy, writing files into `folder`.
    pub async fn run(
        self,
        service: &dyn ContentService,
        pk: u64,
        folder: &Path,
    ) -> Result<Vec<PathBuf>> {
        match self {
            DownloadStrategy::Photo => service.photo_download(pk, folder).await,
            DownloadStrategy::Video => service.video_download(pk, folder).await,
            DownloadStrategy::Clip => service.clip_download(pk, folder).await,
            DownloadStrategy::Igtv => service.igtv_download(pk, folder).await,
            DownloadStrategy::Album => service.album_download(pk, folder).await,
        }
    }
}

impl fmt::Display for DownloadStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadStrategy::Photo => write!(f, "photo_download"),
            DownloadStrategy::Video => write!(f, "video_download"),
            DownloadStrategy::Clip => write!(f, "clip_download"),
            DownloadStrategy::Igtv => write!(f, "igtv_download"),
            DownloadStrategy::Album => write!(f, "album_download"),
        }
    }
}

/// Fixed dispatch table.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    entries: HashMap<(u32, String), DownloadStrategy>,
}

impl DispatchTable {
    /// Normalize the lookup key: simple kinds ignore the reported sub-kind.
    pub fn key(kind: u32, subkind: Option<&str>) -> (u32, String) {
        let simple = matches!(
            MediaKind::from_code(kind),
            Some(MediaKind::Photo) | Some(MediaKind::Album)
        );
        let subkind = if simple {
            ANY_SUBKIND.to_string()
        } else {
            subkind.unwrap_or_default().to_string()
        };
        (kind, subkind)
    }

    /// Strategy for a descriptor's (kind, sub-kind); `None` means unsupported.
    pub fn lookup(&self, kind: u32, subkind: Option<&str>) -> Option<DownloadStrategy> {
        self.entries.get(&Self::key(kind, subkind)).copied()
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        let photo = MediaKind::Photo.code();
        let video = MediaKind::Video.code();
        let album = MediaKind::Album.code();

        let entries = HashMap::from([
            ((photo, ANY_SUBKIND.to_string()), DownloadStrategy::Photo),
            ((video, "feed".to_string()), DownloadStrategy::Video),
            ((video, "clips".to_string()), DownloadStrategy::Clip),
            ((video, "igtv".to_string()), DownloadStrategy::Igtv),
            ((album, ANY_SUBKIND.to_string()), DownloadStrategy::Album),
        ]);
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_kinds_ignore_subkind() {
        let table = DispatchTable::default();
        assert_eq!(table.lookup(1, None), Some(DownloadStrategy::Photo));
        assert_eq!(table.lookup(1, Some("feed")), Some(DownloadStrategy::Photo));
        assert_eq!(
            table.lookup(8, Some("carousel_container")),
            Some(DownloadStrategy::Album)
        );
    }

    #[test]
    fn test_video_subkinds() {
        let table = DispatchTable::default();
        assert_eq!(table.lookup(2, Some("feed")), Some(DownloadStrategy::Video));
        assert_eq!(table.lookup(2, Some("clips")), Some(DownloadStrategy::Clip));
        assert_eq!(table.lookup(2, Some("igtv")), Some(DownloadStrategy::Igtv));
    }

    #[test]
    fn test_unsupported() {
        let table = DispatchTable::default();
        assert_eq!(table.lookup(2, None), None);
        assert_eq!(table.lookup(2, Some("story")), None);
        assert_eq!(table.lookup(2, Some("any")), None);
        assert_eq!(table.lookup(5, Some("any")), None);
    }

    #[test]
    fn test_key_normalization() {
        assert_eq!(DispatchTable::key(1, Some("feed")), (1, "any".to_string()));
        assert_eq!(DispatchTable::key(2, Some("clips")), (2, "clips".to_string()));
        assert_eq!(DispatchTable::key(2, None), (2, String::new()));
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(DownloadStrategy::Photo.to_string(), "photo_download");
        assert_eq!(DownloadStrategy::Album.to_string(), "album_download");
    }
}
