//! Configuration validation logic.

use regex::Regex;

use crate::auth::totp::decode_base32;
use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_username(&config.account.username)?;
    validate_password(&config.account.password)?;
    validate_two_factor(
        config.account.two_factor_enabled,
        config.account.two_factor_seed.as_deref(),
    )?;
    validate_request_timeout(config.client.request_timeout)?;
    if let Some(proxy) = &config.client.proxy_dsn {
        validate_proxy(proxy)?;
    }

    Ok(())
}

/// Validate the account username.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(Error::MissingConfig("username".to_string()));
    }

    let lower = username.to_lowercase();
    if lower == "replaceme" || lower == "username" || lower == "my_username" {
        return Err(Error::ConfigValidation {
            field: "username".to_string(),
            message: format!(
                "Username '{}' appears to be a placeholder. Please provide your account name.",
                username
            ),
        });
    }

    Ok(())
}

/// Validate the account password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingConfig("password".to_string()));
    }

    let lower = password.to_lowercase();
    if lower.contains("replaceme") || lower == "my_password" {
        return Err(Error::ConfigValidation {
            field: "password".to_string(),
            message: "Password appears to be a placeholder.".to_string(),
        });
    }

    Ok(())
}

/// Validate two-factor settings: an enabled account needs a decodable seed.
pub fn validate_two_factor(enabled: bool, seed: Option<&str>) -> Result<()> {
    if !enabled {
        return Ok(());
    }

    let seed = seed
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::MissingConfig("two_factor_seed (two-factor is enabled)".into()))?;

    decode_base32(seed).map_err(|_| Error::ConfigValidation {
        field: "two_factor_seed".to_string(),
        message: "Seed must be a base32 string (A-Z, 2-7)".to_string(),
    })?;

    Ok(())
}

/// Validate the request timeout.
pub fn validate_request_timeout(seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "request_timeout".to_string(),
            message: "Request timeout must be at least 1 second".to_string(),
        });
    }

    Ok(())
}

/// Validate the outbound proxy address.
pub fn validate_proxy(proxy: &str) -> Result<()> {
    url::Url::parse(proxy).map_err(|e| Error::ConfigValidation {
        field: "proxy_dsn".to_string(),
        message: format!("'{}' is not a valid URL: {}", proxy, e),
    })?;

    Ok(())
}

/// Extract a post shortcode from a URL or a bare shortcode.
pub fn parse_identifier(input: &str) -> Result<String> {
    let input = input.trim();

    if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://www.instagram.com/p/ABC123/
        let post_pattern =
            Regex::new(r"^https?://(?:www\.)?instagram\.com/(?:p|reel|reels|tv)/([A-Za-z0-9_-]+)")
                .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(captures) = post_pattern.captures(input) {
            if let Some(code) = captures.get(1) {
                return Ok(code.as_str().to_string());
            }
        }

        return Err(Error::InvalidIdentifier(format!(
            "could not extract a post shortcode from URL: {}",
            input
        )));
    }

    let code_pattern =
        Regex::new(r"^[A-Za-z0-9_-]+$").map_err(|e| Error::Config(e.to_string()))?;
    if code_pattern.is_match(input) {
        return Ok(input.to_string());
    }

    Err(Error::InvalidIdentifier(format!(
        "'{}' is neither a post shortcode nor a post URL",
        input
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.account.username = "someone".into();
        config.account.password = "hunter22".into();
        config
    }

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_username() {
        let mut config = valid_config();
        config.account.username.clear();
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_placeholder_password() {
        let mut config = valid_config();
        config.account.password = "REPLACEME".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_two_factor_requires_seed() {
        let mut config = valid_config();
        config.account.two_factor_enabled = true;
        assert!(matches!(
            validate_config(&config),
            Err(Error::MissingConfig(_))
        ));

        config.account.two_factor_seed = Some("not base32!".into());
        assert!(matches!(
            validate_config(&config),
            Err(Error::ConfigValidation { .. })
        ));

        config.account.two_factor_seed = Some("JBSWY3DPEHPK3PXP".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = valid_config();
        config.client.request_timeout = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_bad_proxy() {
        let mut config = valid_config();
        config.client.proxy_dsn = Some("not a url".into());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_parse_identifier_direct() {
        assert_eq!(parse_identifier("ABC123").unwrap(), "ABC123");
        assert_eq!(parse_identifier(" Cq-x_9Z ").unwrap(), "Cq-x_9Z");
    }

    #[test]
    fn test_parse_identifier_url() {
        assert_eq!(
            parse_identifier("https://www.instagram.com/p/ABC123/").unwrap(),
            "ABC123"
        );
        assert_eq!(
            parse_identifier("https://instagram.com/reel/Cq9xYz/?igshid=abc").unwrap(),
            "Cq9xYz"
        );
        assert_eq!(
            parse_identifier("https://www.instagram.com/tv/B1tv/").unwrap(),
            "B1tv"
        );
    }

    #[test]
    fn test_parse_identifier_invalid() {
        assert!(parse_identifier("https://www.instagram.com/someone/").is_err());
        assert!(matches!(
            parse_identifier("not a code"),
            Err(Error::InvalidIdentifier(_))
        ));
        assert!(parse_identifier("").is_err());
    }
}
