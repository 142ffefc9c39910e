//! API response type definitions.

use serde::{Deserialize, Deserializer};

/// Failure body: `{"status": "fail", "message": "...", "error_type": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
}

/// Login response.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub logged_in_user: LoggedInUser,
}

#[derive(Debug, Deserialize)]
pub struct LoggedInUser {
    #[serde(deserialize_with = "string_or_number")]
    pub pk: String,
    pub username: String,
}

/// Response of the media info endpoint.
#[derive(Debug, Deserialize)]
pub struct MediaInfoResponse {
    #[serde(default)]
    pub items: Vec<MediaInfo>,
}

/// One media item.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub pk: String,
    pub media_type: u32,
    #[serde(default)]
    pub product_type: Option<String>,
    pub user: MediaUser,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub video_versions: Vec<VideoVersion>,
    #[serde(default)]
    pub carousel_media: Vec<CarouselResource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaUser {
    #[serde(deserialize_with = "string_or_number")]
    pub pk: String,
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVersions {
    #[serde(default)]
    pub candidates: Vec<ImageCandidate>,
}

/// Image rendition.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Video rendition.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoVersion {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Album member.
#[derive(Debug, Clone, Deserialize)]
pub struct CarouselResource {
    #[serde(deserialize_with = "string_or_number")]
    pub pk: String,
    pub media_type: u32,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub video_versions: Vec<VideoVersion>,
}

/// Identifiers come back as numbers or strings depending on the endpoint.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
