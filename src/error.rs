//! Error types for the post-fetcher application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    #[error("Invalid post identifier: {0}")]
    InvalidIdentifier(String),

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Two-factor code generation failed: {0}")]
    TwoFactor(String),

    // Remote service failures
    #[error("Login required: {0}")]
    LoginRequired(String),

    #[error("Challenge required: {0}")]
    ChallengeRequired(String),

    #[error("Please wait a few minutes before you try again: {0}")]
    PleaseWaitFewMinutes(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("API error: {0}")]
    Api(String),

    // Content errors
    #[error("Media not found: {0}")]
    MediaNotFound(String),

    #[error("Media unavailable: {0}")]
    MediaUnavailable(String),

    #[error("Too many errors while fetching {identifier} (error count {error_count})")]
    TooManyErrors { identifier: String, error_count: u32 },

    // Download errors
    #[error("Download failed: {0}")]
    Download(String),

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // URL parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether the remote item is gone for good (deleted or hidden).
    pub fn is_source_gone(&self) -> bool {
        matches!(self, Error::MediaNotFound(_) | Error::MediaUnavailable(_))
    }

    /// Whether this is a configuration problem that no retry can fix.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config(_)
                | Error::ConfigValidation { .. }
                | Error::MissingConfig(_)
                | Error::InvalidIdentifier(_)
        )
    }
}

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
    pub const SOME_POSTS_FAILED: i32 = 6;
}
