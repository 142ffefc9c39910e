//! Fetch outcome records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Placeholder for fields that could not be resolved.
pub const UNDEFINED: &str = "undefined";

/// Terminal status of one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Completed,
    NotSupported,
    /// A strategy ran but the owner directory is empty.
    Failed,
    /// The post is deleted or hidden. Processing is complete.
    SourceNotFound,
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Completed => write!(f, "completed"),
            FetchStatus::NotSupported => write!(f, "not_supported"),
            FetchStatus::Failed => write!(f, "failed"),
            FetchStatus::SourceNotFound => write!(f, "source_not_found"),
        }
    }
}

/// What happened to one requested post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchOutcome {
    pub post: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub status: FetchStatus,
}

impl FetchOutcome {
    pub fn new(
        post: impl Into<String>,
        owner: impl Into<String>,
        content_type: impl Into<String>,
        status: FetchStatus,
    ) -> Self {
        Self {
            post: post.into(),
            owner: owner.into(),
            content_type: content_type.into(),
            status,
        }
    }

    /// Outcome for a post that no longer exists upstream.
    pub fn source_not_found(post: impl Into<String>) -> Self {
        Self::new(post, UNDEFINED, UNDEFINED, FetchStatus::SourceNotFound)
    }
}
