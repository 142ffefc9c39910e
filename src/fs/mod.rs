//! Filesystem module.
//!
//! Provides:
//! - Owner directory layout under the data directory
//! - Filename and path-component sanitizing

pub mod naming;
pub mod paths;

pub use naming::{sanitize_filename, sanitize_path_component};
pub use paths::{ensure_dir, is_dir_empty, owner_directory};
