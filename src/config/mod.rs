//! Configuration module for the post-fetcher.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Building configuration from a flat settings mapping
//! - Configuration validation and identifier parsing

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{AccountConfig, ClientSettings, Config, StorageConfig};
pub use validation::{parse_identifier, validate_config};
