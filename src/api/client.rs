//! Private API HTTP client.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::StreamExt;
use rand::Rng;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tokio::time::sleep;

use crate::api::service::{AuthClient, ContentService, LoginArgs};
use crate::api::shortcode;
use crate::api::types::{ErrorResponse, LoginResponse, MediaInfo, MediaInfoResponse};
use crate::config::ClientSettings;
use crate::error::{Error, Result};
use crate::fs::naming::sanitize_filename;
use crate::media::{
    album_resources, photo_resource, video_resource, DownloadResource, MediaDescriptor, MediaKind,
};
use crate::output::progress::create_download_bar;
use crate::session::Session;

/// Minimum file size to show progress bar (20 MB).
const PROGRESS_THRESHOLD: u64 = 20 * 1024 * 1024;

/// Private API client holding one live session.
pub struct InstagramApi {
    client: Client,
    settings: ClientSettings,
    api_base: String,
    session: Arc<RwLock<Session>>,
}

impl InstagramApi {
    /// Create a client with a blank session.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(settings.timeout());

        if let Some(proxy) = &settings.proxy_dsn {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Api(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            locale = %settings.locale,
            country_code = settings.country_code,
            timezone_offset = settings.timezone_offset,
            request_timeout = settings.request_timeout,
            delay_requests = settings.delay_requests,
            proxy = settings.proxy_dsn.is_some(),
            "Client settings"
        );

        Ok(Self {
            client,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            settings,
            session: Arc::new(RwLock::new(Session::new())),
        })
    }

    /// Random delay between API requests.
    async fn pause(&self) {
        if self.settings.delay_requests == 0 {
            return;
        }
        let secs = rand::thread_rng().gen_range(1..=self.settings.delay_requests);
        tracing::debug!("Delaying request by {}s", secs);
        sleep(Duration::from_secs(secs)).await;
    }

    /// Build common headers for API requests.
    async fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let session = self.session.read().await;

        if let Some(authorization) = &session.authorization {
            headers.insert(header::AUTHORIZATION, header_value(authorization)?);
        }
        if !session.cookies.is_empty() {
            let cookie = session
                .cookies
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("; ");
            headers.insert(header::COOKIE, header_value(&cookie)?);
        }

        let locale = header_value(&self.settings.locale)?;
        headers.insert(header::ACCEPT_LANGUAGE, locale.clone());
        headers.insert("x-ig-app-locale", locale.clone());
        headers.insert("x-ig-device-locale", locale.clone());
        headers.insert("x-ig-mapped-locale", locale);
        headers.insert(
            "x-ig-timezone-offset",
            header_value(&self.settings.timezone_offset.to_string())?,
        );
        headers.insert(
            "x-ig-country-code",
            header_value(&self.settings.country_code.to_string())?,
        );
        headers.insert("x-ig-device-id", header_value(&session.device.uuid)?);
        headers.insert(
            "x-ig-android-id",
            header_value(&session.device.android_device_id)?,
        );
        headers.insert("x-ig-connection-type", HeaderValue::from_static("WIFI"));

        Ok(headers)
    }

    /// Make an authenticated GET request.
    async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("GET {}", url);
        let request = self.client.get(&url).headers(self.build_headers().await?);
        self.send(request).await
    }

    /// Make an authenticated form POST request.
    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<Response> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("POST {}", url);
        let request = self
            .client
            .post(&url)
            .headers(self.build_headers().await?)
            .form(form);
        self.send(request).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.pause().await;

        let response = request.send().await.map_err(map_transport)?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status.is_success() {
            self.remember_cookies(response.headers()).await;
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(failure_from_response(status, &body))
    }

    /// Store `Set-Cookie` values in the live session.
    async fn remember_cookies(&self, headers: &HeaderMap) {
        let cookies: Vec<(String, String)> = headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter_map(|v| v.split(';').next())
            .filter_map(|pair| pair.split_once('='))
            .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
            .collect();

        if !cookies.is_empty() {
            self.session.write().await.cookies.extend(cookies);
        }
    }

    /// Fetch full media info.
    async fn fetch_media(&self, pk: u64) -> Result<MediaInfo> {
        let response = self.get(&format!("/api/v1/media/{}/info/", pk)).await?;
        let info: MediaInfoResponse = parse_json(response, "media info").await?;

        info.items
            .into_iter()
            .next()
            .ok_or_else(|| Error::MediaUnavailable(format!("media {} returned no items", pk)))
    }

    async fn download_video(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        let info = self.fetch_media(pk).await?;
        if MediaKind::from_code(info.media_type) != Some(MediaKind::Video) {
            return Err(Error::Download(format!(
                "media {} is not a video (type {})",
                pk, info.media_type
            )));
        }
        let resource = video_resource(&info)
            .ok_or_else(|| Error::Download(format!("no video rendition for media {}", pk)))?;

        Ok(vec![
            self.download_resource(&resource, &info.user.username, folder)
                .await?,
        ])
    }

    /// Stream one resource to `<folder>/<owner>_<pk>.<ext>`.
    async fn download_resource(
        &self,
        resource: &DownloadResource,
        owner: &str,
        folder: &Path,
    ) -> Result<PathBuf> {
        let output_path = folder.join(sanitize_filename(&resource.filename(owner))?);

        let response = self
            .client
            .get(&resource.url)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(match status {
                StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                    Error::Timeout(format!("HTTP {} for {}", status, resource.url))
                }
                _ => Error::Download(format!("Failed to download file: HTTP {}", status)),
            });
        }

        if let Err(e) = self.stream_to_file(response, &output_path).await {
            let _ = tokio::fs::remove_file(&output_path).await;
            return Err(e);
        }

        tracing::info!("Downloaded: {}", output_path.display());
        Ok(output_path)
    }

    async fn stream_to_file(&self, response: Response, output_path: &Path) -> Result<()> {
        let content_length = response.content_length();
        let progress = (self.settings.show_progress
            && content_length.map(|l| l > PROGRESS_THRESHOLD).unwrap_or(false))
        .then(|| create_download_bar(content_length.unwrap_or(0)));

        let mut file = File::create(output_path).await?;
        let mut stream = response.bytes_stream();
        let mut downloaded: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_transport)?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;

            if let Some(ref pb) = progress {
                pb.set_position(downloaded);
            }
        }

        file.flush().await?;

        if let Some(pb) = progress {
            pb.finish_and_clear();
        }

        Ok(())
    }
}

#[async_trait]
impl AuthClient for InstagramApi {
    async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    async fn set_session(&self, session: Session) {
        *self.session.write().await = session;
    }

    async fn login(&self, args: &LoginArgs) -> Result<()> {
        let device = self.session.read().await.device.clone();
        let enc_password = format!(
            "#PWD_INSTAGRAM:0:{}:{}",
            Utc::now().timestamp(),
            args.password
        );

        let mut form = vec![
            ("username", args.username.clone()),
            ("enc_password", enc_password),
            ("phone_id", device.phone_id),
            ("guid", device.uuid),
            ("device_id", device.android_device_id),
            ("adid", device.advertising_id),
            ("login_attempt_count", "0".to_string()),
        ];
        if let Some(code) = &args.verification_code {
            form.push(("verification_code", code.clone()));
        }

        let response = self.post_form("/api/v1/accounts/login/", &form).await?;
        let authorization = response
            .headers()
            .get("ig-set-authorization")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        let login: LoginResponse = parse_json(response, "login").await?;

        let mut session = self.session.write().await;
        session.authorization = authorization;
        session.user_id = Some(login.logged_in_user.pk);
        session.last_login = Some(Utc::now());
        tracing::debug!("Logged in as {}", login.logged_in_user.username);

        Ok(())
    }

    async fn timeline_feed(&self) -> Result<()> {
        let device = self.session.read().await.device.clone();
        let form = [
            ("reason", "cold_start_fetch".to_string()),
            ("is_pull_to_refresh", "0".to_string()),
            ("phone_id", device.phone_id),
            ("device_id", device.uuid),
            ("timezone_offset", self.settings.timezone_offset.to_string()),
        ];

        let response = self.post_form("/api/v1/feed/timeline/", &form).await?;
        let _: serde_json::Value = parse_json(response, "timeline feed").await?;
        Ok(())
    }
}

#[async_trait]
impl ContentService for InstagramApi {
    async fn media_pk_from_code(&self, code: &str) -> Result<u64> {
        shortcode::media_pk_from_code(code)
    }

    async fn media_info(&self, pk: u64) -> Result<MediaDescriptor> {
        let info = self.fetch_media(pk).await?;
        Ok(MediaDescriptor {
            pk: info.pk.parse().unwrap_or(pk),
            kind: info.media_type,
            subkind: info.product_type,
            owner: info.user.username,
        })
    }

    async fn photo_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        let info = self.fetch_media(pk).await?;
        if MediaKind::from_code(info.media_type) != Some(MediaKind::Photo) {
            return Err(Error::Download(format!(
                "media {} is not a photo (type {})",
                pk, info.media_type
            )));
        }
        let resource = photo_resource(&info)
            .ok_or_else(|| Error::Download(format!("no image rendition for media {}", pk)))?;

        Ok(vec![
            self.download_resource(&resource, &info.user.username, folder)
                .await?,
        ])
    }

    async fn video_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        self.download_video(pk, folder).await
    }

    async fn clip_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        self.download_video(pk, folder).await
    }

    async fn igtv_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        self.download_video(pk, folder).await
    }

    async fn album_download(&self, pk: u64, folder: &Path) -> Result<Vec<PathBuf>> {
        let info = self.fetch_media(pk).await?;
        let resources = album_resources(&info);
        if resources.is_empty() {
            return Err(Error::Download(format!("album {} has no resources", pk)));
        }

        let mut paths = Vec::with_capacity(resources.len());
        for resource in &resources {
            paths.push(
                self.download_resource(resource, &info.user.username, folder)
                    .await?,
            );
        }
        Ok(paths)
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| Error::Api(format!("Invalid header value '{}': {}", value, e)))
}

/// Transport failures: timeouts and refused/reset connections are distinct.
fn map_transport(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout(error.to_string())
    } else if error.is_connect() {
        Error::Connection(error.to_string())
    } else {
        Error::Http(error)
    }
}

/// Parse a success body, catching `{"status": "fail"}` payloads served with 200.
async fn parse_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();
    let text = response.text().await.map_err(map_transport)?;
    tracing::debug!("{} response length: {} bytes", what, text.len());

    if let Ok(failure) = serde_json::from_str::<ErrorResponse>(&text) {
        if failure.status.as_deref() == Some("fail") {
            return Err(failure_from_response(status, &text));
        }
    }

    serde_json::from_str(&text).map_err(|e| {
        Error::Api(format!(
            "Failed to parse {}: {} - Response: {}",
            what,
            e,
            text.chars().take(500).collect::<String>()
        ))
    })
}

/// Map a failed response onto a typed error.
pub(crate) fn failure_from_response(status: StatusCode, body: &str) -> Error {
    let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| body.chars().take(200).collect());
    let error_type = parsed.error_type.unwrap_or_default();
    let lower = message.to_lowercase();

    if lower.contains("challenge_required")
        || lower.contains("checkpoint_required")
        || error_type.contains("checkpoint")
    {
        Error::ChallengeRequired(message)
    } else if lower.contains("login_required")
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        Error::LoginRequired(message)
    } else if status == StatusCode::TOO_MANY_REQUESTS || lower.contains("please wait a few minutes")
    {
        Error::PleaseWaitFewMinutes(message)
    } else if status == StatusCode::NOT_FOUND || lower.contains("media not found") {
        Error::MediaNotFound(message)
    } else if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
        Error::Timeout(format!("HTTP {}: {}", status, message))
    } else {
        Error::Api(format!("HTTP {}: {}", status, message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: &MockServer) -> ClientSettings {
        ClientSettings {
            delay_requests: 0,
            api_base: server.uri(),
            ..ClientSettings::default()
        }
    }

    fn media_json(server: &MockServer, media_type: u32, product_type: &str) -> serde_json::Value {
        json!({
            "items": [{
                "pk": 3_100_000_000_000_000_001u64,
                "media_type": media_type,
                "product_type": product_type,
                "user": {"pk": 42, "username": "someone"},
                "image_versions2": {"candidates": [
                    {"url": format!("{}/cdn/small.jpg", server.uri()), "width": 320, "height": 320},
                    {"url": format!("{}/cdn/large.jpg", server.uri()), "width": 1080, "height": 1080}
                ]},
                "video_versions": [
                    {"url": format!("{}/cdn/clip.mp4", server.uri()), "width": 720, "height": 1280}
                ]
            }],
            "status": "ok"
        })
    }

    #[test]
    fn test_failure_mapping() {
        let challenge = r#"{"message": "challenge_required", "status": "fail"}"#;
        assert!(matches!(
            failure_from_response(StatusCode::BAD_REQUEST, challenge),
            Error::ChallengeRequired(_)
        ));

        let login = r#"{"message": "login_required", "status": "fail"}"#;
        assert!(matches!(
            failure_from_response(StatusCode::BAD_REQUEST, login),
            Error::LoginRequired(_)
        ));

        let wait = r#"{"message": "Please wait a few minutes before you try again.", "status": "fail"}"#;
        assert!(matches!(
            failure_from_response(StatusCode::BAD_REQUEST, wait),
            Error::PleaseWaitFewMinutes(_)
        ));
        assert!(matches!(
            failure_from_response(StatusCode::TOO_MANY_REQUESTS, ""),
            Error::PleaseWaitFewMinutes(_)
        ));

        let gone = r#"{"message": "Media not found or unavailable", "status": "fail"}"#;
        assert!(matches!(
            failure_from_response(StatusCode::BAD_REQUEST, gone),
            Error::MediaNotFound(_)
        ));
        assert!(matches!(
            failure_from_response(StatusCode::NOT_FOUND, "<html>"),
            Error::MediaNotFound(_)
        ));

        assert!(matches!(
            failure_from_response(StatusCode::GATEWAY_TIMEOUT, ""),
            Error::Timeout(_)
        ));
        assert!(matches!(
            failure_from_response(StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            Error::Api(_)
        ));
    }

    #[tokio::test]
    async fn test_login_stores_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/accounts/login/"))
            .and(body_string_contains("username=someone"))
            .and(body_string_contains("verification_code=123456"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("ig-set-authorization", "Bearer IGT:2:token")
                    .insert_header("set-cookie", "csrftoken=abc; Path=/; Secure")
                    .set_body_json(json!({
                        "logged_in_user": {"pk": 1001, "username": "someone"},
                        "status": "ok"
                    })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        let before = api.session().await;
        api.login(&LoginArgs {
            username: "someone".into(),
            password: "secret".into(),
            verification_code: Some("123456".into()),
        })
        .await
        .unwrap();

        let session = api.session().await;
        assert_eq!(session.id, before.id);
        assert_eq!(session.authorization.as_deref(), Some("Bearer IGT:2:token"));
        assert_eq!(session.user_id.as_deref(), Some("1001"));
        assert_eq!(session.cookies.get("csrftoken").map(String::as_str), Some("abc"));
        assert!(session.last_login.is_some());
    }

    #[tokio::test]
    async fn test_login_challenge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/accounts/login/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "challenge_required",
                "status": "fail",
                "error_type": "checkpoint_challenge_required"
            })))
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        let err = api
            .login(&LoginArgs {
                username: "someone".into(),
                password: "secret".into(),
                verification_code: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ChallengeRequired(_)));
    }

    #[tokio::test]
    async fn test_timeline_sends_authorization() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/feed/timeline/"))
            .and(header("authorization", "Bearer live"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        let mut session = Session::new();
        session.authorization = Some("Bearer live".into());
        api.set_session(session).await;

        api.timeline_feed().await.unwrap();
    }

    #[tokio::test]
    async fn test_timeline_fail_status_with_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/feed/timeline/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "login_required",
                "status": "fail"
            })))
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        assert!(matches!(
            api.timeline_feed().await,
            Err(Error::LoginRequired(_))
        ));
    }

    #[tokio::test]
    async fn test_media_info_descriptor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/3100000000000000001/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(media_json(&server, 2, "clips")))
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        let descriptor = api.media_info(3_100_000_000_000_000_001).await.unwrap();
        assert_eq!(descriptor.kind, 2);
        assert_eq!(descriptor.subkind.as_deref(), Some("clips"));
        assert_eq!(descriptor.owner, "someone");
        assert_eq!(descriptor.pk, 3_100_000_000_000_000_001);
    }

    #[tokio::test]
    async fn test_media_info_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/1/info/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Media not found or unavailable",
                "status": "fail"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/2/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "status": "ok"})))
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        assert!(matches!(api.media_info(1).await, Err(Error::MediaNotFound(_))));
        assert!(matches!(api.media_info(2).await, Err(Error::MediaUnavailable(_))));
    }

    #[tokio::test]
    async fn test_rate_limited_media_info() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/5/info/"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let api = InstagramApi::new(settings(&server)).unwrap();
        assert!(matches!(
            api.media_info(5).await,
            Err(Error::PleaseWaitFewMinutes(_))
        ));
    }

    #[tokio::test]
    async fn test_photo_download_writes_largest_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/3100000000000000001/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(media_json(&server, 1, "feed")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/large.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0]))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let api = InstagramApi::new(settings(&server)).unwrap();
        let paths = api
            .photo_download(3_100_000_000_000_000_001, dir.path())
            .await
            .unwrap();

        assert_eq!(paths.len(), 1);
        assert_eq!(
            paths[0],
            dir.path().join("someone_3100000000000000001.jpg")
        );
        assert_eq!(std::fs::read(&paths[0]).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[tokio::test]
    async fn test_clip_download_rejects_photo() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/3100000000000000001/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(media_json(&server, 1, "feed")))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let api = InstagramApi::new(settings(&server)).unwrap();
        let err = api
            .clip_download(3_100_000_000_000_000_001, dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Download(_)));
    }

    #[tokio::test]
    async fn test_album_download_writes_every_member() {
        let server = MockServer::start().await;
        let body = json!({
            "items": [{
                "pk": "77",
                "media_type": 8,
                "product_type": "carousel_container",
                "user": {"pk": 42, "username": "someone"},
                "carousel_media": [
                    {"pk": 78, "media_type": 1, "image_versions2": {"candidates": [
                        {"url": format!("{}/cdn/a.jpg", server.uri()), "width": 1080, "height": 1080}
                    ]}},
                    {"pk": 79, "media_type": 2, "video_versions": [
                        {"url": format!("{}/cdn/b.mp4", server.uri()), "width": 720, "height": 720}
                    ]}
                ]
            }],
            "status": "ok"
        });
        Mock::given(method("GET"))
            .and(path("/api/v1/media/77/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/b.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4".to_vec()))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let api = InstagramApi::new(settings(&server)).unwrap();
        let paths = api.album_download(77, dir.path()).await.unwrap();

        assert_eq!(
            paths,
            vec![
                dir.path().join("someone_78.jpg"),
                dir.path().join("someone_79.mp4")
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_cdn_download_leaves_no_file() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/media/3100000000000000001/info/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(media_json(&server, 2, "feed")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/cdn/clip.mp4"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let api = InstagramApi::new(settings(&server)).unwrap();
        let err = api
            .video_download(3_100_000_000_000_000_001, dir.path())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Download(_)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
