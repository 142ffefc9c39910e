//! Media kind and descriptor.

use std::fmt;

/// Numeric media kinds reported by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Album,
}

impl MediaKind {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(MediaKind::Photo),
            2 => Some(MediaKind::Video),
            8 => Some(MediaKind::Album),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            MediaKind::Photo => 1,
            MediaKind::Video => 2,
            MediaKind::Album => 8,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Album => write!(f, "album"),
        }
    }
}

/// Label used for content without a sub-kind.
pub const DEFAULT_CONTENT_TYPE: &str = "photo";

/// Metadata of one post, resolved per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDescriptor {
    pub pk: u64,
    /// Raw numeric kind (1 photo, 2 video, 8 album).
    pub kind: u32,
    /// Product type such as `feed`, `clips` or `igtv`.
    pub subkind: Option<String>,
    /// Username of the owner.
    pub owner: String,
}

impl MediaDescriptor {
    /// Content-type label reported in fetch outcomes.
    pub fn content_type(&self) -> &str {
        self.subkind
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }
}
