//! post-fetcher - fetch single Instagram posts through resilient sessions.
//!
//! # Features
//!
//! - Resume, fresh and renew logins with a persisted session file
//! - Time-based two-factor codes derived from a stored seed
//! - Classified retry: re-login, long backoff or short backoff per failure kind
//! - Photo, video, reel, IGTV and album downloads into `<data>/<owner>/`
//! - Deleted posts reported as `source_not_found` instead of errors
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use post_fetcher::{connect, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let fetcher = connect(&config).await?;
//!
//!     let outcome = fetcher.fetch("https://www.instagram.com/p/ABC123/").await?;
//!     println!("{} {}", outcome.post, outcome.status);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod fs;
pub mod media;
pub mod output;
pub mod retry;
pub mod session;

// Re-exports for convenience
pub use api::InstagramApi;
pub use auth::{AuthStateMachine, LoginMode};
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{connect, ContentFetcher, FetchOutcome, FetchStatus};
pub use retry::ResilientCaller;
