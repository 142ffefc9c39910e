//! Instagram private API module.
//!
//! This module provides:
//! - HTTP client for the private mobile API
//! - Service traits the login and fetch layers are written against
//! - Shortcode decoding
//! - API response types

pub mod client;
pub mod service;
pub mod shortcode;
pub mod types;

pub use client::InstagramApi;
pub use service::{AuthClient, ContentService, LoginArgs};
