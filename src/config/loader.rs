//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub client: ClientSettings,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Account credentials configuration.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Account username.
    #[serde(default)]
    pub username: String,

    /// Account password.
    #[serde(default)]
    pub password: String,

    /// Whether the account has two-factor authentication enabled.
    #[serde(default)]
    pub two_factor_enabled: bool,

    /// Base32 seed of the authenticator app.
    #[serde(default)]
    pub two_factor_seed: Option<String>,
}

impl std::fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("two_factor_enabled", &self.two_factor_enabled)
            .field(
                "two_factor_seed",
                &self.two_factor_seed.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Settings applied to every outbound request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Upper bound (seconds) of the random delay before each request. Zero disables it.
    #[serde(default = "default_delay_requests")]
    pub delay_requests: u64,

    /// Request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_country_code")]
    pub country_code: u32,

    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone_offset: i32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Outbound proxy, e.g. `http://localhost:8080`.
    #[serde(default)]
    pub proxy_dsn: Option<String>,

    /// Base URL of the private API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Whether to draw progress bars for large downloads.
    #[serde(default)]
    pub show_progress: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            delay_requests: default_delay_requests(),
            request_timeout: default_request_timeout(),
            locale: default_locale(),
            country_code: default_country_code(),
            timezone_offset: 0,
            user_agent: default_user_agent(),
            proxy_dsn: None,
            api_base: default_api_base(),
            show_progress: false,
        }
    }
}

impl ClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where the authenticated session is persisted.
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Root directory for downloaded content, one subdirectory per owner.
    #[serde(default = "default_data_directory")]
    pub data_directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
            data_directory: default_data_directory(),
        }
    }
}

pub(crate) fn default_delay_requests() -> u64 {
    1
}

pub(crate) fn default_request_timeout() -> u64 {
    10
}

pub(crate) fn default_locale() -> String {
    "en_US".to_string()
}

pub(crate) fn default_country_code() -> u32 {
    1
}

pub(crate) fn default_user_agent() -> String {
    "Instagram 269.0.0.18.75 Android (26/8.0.0; 480dpi; 1080x1920; OnePlus; 6T Dev; devitron; qcom; en_US; 314665256)".to_string()
}

fn default_api_base() -> String {
    "https://i.instagram.com".to_string()
}

pub(crate) fn default_session_file() -> PathBuf {
    ProjectDirs::from("", "", "post-fetcher")
        .map(|dirs| dirs.data_dir().join("session.json"))
        .unwrap_or_else(|| PathBuf::from("session.json"))
}

fn default_data_directory() -> PathBuf {
    PathBuf::from("data")
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid config {}: {}", path.display(), e)))
    }
}
