//! Time-based one-time codes (RFC 6238) for two-factor login.

use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{Error, Result};

type HmacSha1 = Hmac<Sha1>;

/// Length of a generated code.
pub const CODE_DIGITS: u32 = 6;

/// Validity window of one code in seconds.
pub const TIME_STEP: u64 = 30;

/// Decode an RFC 4648 base32 string. Padding, spaces and case are ignored.
pub fn decode_base32(input: &str) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0;

    for c in input.chars().filter(|c| !c.is_whitespace() && *c != '=') {
        let value = match c.to_ascii_uppercase() {
            c @ 'A'..='Z' => c as u32 - 'A' as u32,
            c @ '2'..='7' => c as u32 - '2' as u32 + 26,
            other => {
                return Err(Error::TwoFactor(format!(
                    "invalid base32 character '{}'",
                    other
                )))
            }
        };

        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    if out.is_empty() {
        return Err(Error::TwoFactor("empty seed".into()));
    }

    Ok(out)
}

/// HOTP value for a raw key and counter (RFC 4226 dynamic truncation).
fn hotp(key: &[u8], counter: u64, digits: u32) -> Result<u32> {
    let mut mac =
        HmacSha1::new_from_slice(key).map_err(|e| Error::TwoFactor(e.to_string()))?;
    mac.update(&counter.to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = ((digest[offset] as u32 & 0x7f) << 24)
        | ((digest[offset + 1] as u32) << 16)
        | ((digest[offset + 2] as u32) << 8)
        | (digest[offset + 3] as u32);

    Ok(binary % 10u32.pow(digits))
}

/// Generate the code valid at `unix_time` for a base32 `seed`.
pub fn generate_code(seed: &str, unix_time: u64) -> Result<String> {
    let key = decode_base32(seed)?;
    let value = hotp(&key, unix_time / TIME_STEP, CODE_DIGITS)?;
    Ok(format!("{:0width$}", value, width = CODE_DIGITS as usize))
}
