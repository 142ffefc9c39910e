//! Filename and path-component sanitizing.

use crate::error::{Error, Result};

/// Reject names that could escape the target directory.
fn reject_escapes(name: &str) -> Result<()> {
    if name.contains("..") || name.trim() == "." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }
    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed: '{}'",
            name
        )));
    }
    Ok(())
}

fn replace_reserved(name: &str, separators: bool) -> Result<String> {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' if separators => '_',
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.trim().is_empty() {
        return Err(Error::InvalidFilename(
            "Name cannot be empty or whitespace-only".to_string(),
        ));
    }

    Ok(sanitized)
}

/// Sanitize a file name. Path separators are an error, not replaced.
pub fn sanitize_filename(name: &str) -> Result<String> {
    reject_escapes(name)?;

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    replace_reserved(name, false)
}

/// Sanitize a directory name such as an owner identity.
///
/// Separators are replaced rather than rejected.
pub fn sanitize_path_component(name: &str) -> Result<String> {
    reject_escapes(name)?;
    replace_reserved(name, true)
}
