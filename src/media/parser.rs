//! Media parsing utilities: pick the rendition to download for each resource.

use crate::api::types::{ImageVersions, MediaInfo, VideoVersion};
use crate::media::item::MediaKind;

/// One file to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResource {
    pub pk: String,
    pub url: String,
    /// Without the dot.
    pub file_extension: String,
}

impl DownloadResource {
    /// `<owner>_<pk>.<ext>`
    pub fn filename(&self, owner: &str) -> String {
        format!("{}_{}.{}", owner, self.pk, self.file_extension)
    }
}

/// Photo of a single-image post.
pub fn photo_resource(info: &MediaInfo) -> Option<DownloadResource> {
    image_resource(&info.pk, info.image_versions2.as_ref())
}

/// Video of a video post (feed, clip or igtv).
pub fn video_resource(info: &MediaInfo) -> Option<DownloadResource> {
    video_resource_of(&info.pk, &info.video_versions)
}

/// Every member of an album, in order. Members without a usable rendition are skipped.
pub fn album_resources(info: &MediaInfo) -> Vec<DownloadResource> {
    info.carousel_media
        .iter()
        .filter_map(|member| match MediaKind::from_code(member.media_type) {
            Some(MediaKind::Video) => video_resource_of(&member.pk, &member.video_versions),
            Some(MediaKind::Photo) => image_resource(&member.pk, member.image_versions2.as_ref()),
            _ => None,
        })
        .collect()
}

fn image_resource(pk: &str, versions: Option<&ImageVersions>) -> Option<DownloadResource> {
    let candidate = versions?
        .candidates
        .iter()
        .max_by_key(|c| (c.width as u64) * (c.height as u64))?;

    Some(DownloadResource {
        pk: pk.to_string(),
        url: candidate.url.clone(),
        file_extension: extract_extension(&candidate.url, "image/jpeg"),
    })
}

fn video_resource_of(pk: &str, versions: &[VideoVersion]) -> Option<DownloadResource> {
    let version = versions
        .iter()
        .max_by_key(|v| (v.width as u64) * (v.height as u64))?;

    Some(DownloadResource {
        pk: pk.to_string(),
        url: version.url.clone(),
        file_extension: extract_extension(&version.url, "video/mp4"),
    })
}

/// Extract file extension from URL and MIME type.
pub fn extract_extension(url: &str, mimetype: &str) -> String {
    // First try to get from URL
    if let Some(ext) = extract_extension_from_url(url) {
        return ext;
    }

    // Fall back to MIME type
    mime_to_extension(mimetype)
}

/// Extract extension from URL path.
fn extract_extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let filename = parsed.path_segments()?.last()?;

    let (_, ext) = filename.rsplit_once('.')?;

    // Validate it looks like an extension (1-10 chars, alphanumeric)
    if !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext.to_lowercase())
    } else {
        None
    }
}

/// Convert MIME type to file extension.
pub fn mime_to_extension(mimetype: &str) -> String {
    let base = mimetype.split(';').next().unwrap_or("").trim();
    match base {
        // Images
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/heic" => "heic",

        // Videos
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/quicktime" => "mov",

        // Default
        _ => "bin",
    }
    .to_string()
}
