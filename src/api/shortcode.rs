//! Shortcode ↔ media primary key.

use crate::error::{Error, Result};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Private-post codes carry a suffix of this length after the media code.
const PRIVATE_SUFFIX_LENGTH: usize = 28;

/// Decode a shortcode into the media primary key.
///
/// Codes longer than 28 characters are private-post codes; their trailing 28
/// characters are dropped before decoding.
pub fn media_pk_from_code(code: &str) -> Result<u64> {
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::InvalidIdentifier("empty shortcode".into()));
    }

    let bytes = code.as_bytes();
    let significant = if bytes.len() > PRIVATE_SUFFIX_LENGTH {
        &bytes[..bytes.len() - PRIVATE_SUFFIX_LENGTH]
    } else {
        bytes
    };

    significant.iter().try_fold(0u64, |pk, &byte| {
        let digit = ALPHABET.iter().position(|&c| c == byte).ok_or_else(|| {
            Error::InvalidIdentifier(format!("'{}' contains '{}'", code, byte as char))
        })?;
        pk.checked_mul(64)
            .and_then(|pk| pk.checked_add(digit as u64))
            .ok_or_else(|| Error::InvalidIdentifier(format!("'{}' is too long", code)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(media_pk_from_code("B").unwrap(), 1);
        assert_eq!(media_pk_from_code("BA").unwrap(), 64);
        assert_eq!(media_pk_from_code("B_").unwrap(), 127);
        assert_eq!(
            media_pk_from_code("BjBDLhQDuBh").unwrap(),
            1_783_720_913_172_095_073
        );
    }

    #[test]
    fn test_private_code_suffix_is_dropped() {
        let private = "BjBDLhQDuBhAbCdEfGhIjKlMnOpQrStUvWxYz01";
        assert_eq!(private.len(), 39);
        assert_eq!(
            media_pk_from_code(private).unwrap(),
            1_783_720_913_172_095_073
        );
    }

    #[test]
    fn test_invalid_character() {
        assert!(matches!(
            media_pk_from_code("AB*C"),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(media_pk_from_code("  ").is_err());
    }

    #[test]
    fn test_overflow() {
        assert!(media_pk_from_code("__________________").is_err());
    }
}
