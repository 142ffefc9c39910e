//! Flat named-settings mapping, as exported by a secret store.
//!
//! Keys: `username`, `password`, `session-file`, `delay-requests`,
//! `2fa-enabled`, `2fa-seed`, `locale`, `country-code`, `timezone-offset`,
//! `user-agent`, `proxy-dsn`, `request-timeout`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config::loader::{AccountConfig, ClientSettings, Config, StorageConfig};
use crate::error::{Error, Result};

impl Config {
    /// Build a configuration from a flat mapping of named settings.
    ///
    /// `username` and `password` are required; everything else falls back to
    /// the same defaults as the TOML loader.
    pub fn from_settings(settings: &HashMap<String, String>) -> Result<Self> {
        let get = |key: &str| lookup(settings, key);

        let username = get("username")
            .ok_or_else(|| Error::MissingConfig("username".into()))?
            .to_string();
        let password = get("password")
            .ok_or_else(|| Error::MissingConfig("password".into()))?
            .to_string();

        let account = AccountConfig {
            username,
            password,
            two_factor_enabled: get("2fa-enabled")
                .map(|v| parse_bool("2fa-enabled", v))
                .transpose()?
                .unwrap_or(false),
            two_factor_seed: get("2fa-seed").map(str::to_string),
        };

        let defaults = ClientSettings::default();
        let client = ClientSettings {
            delay_requests: parse_or("delay-requests", get("delay-requests"), defaults.delay_requests)?,
            request_timeout: parse_or(
                "request-timeout",
                get("request-timeout"),
                defaults.request_timeout,
            )?,
            locale: get("locale").map(str::to_string).unwrap_or(defaults.locale),
            country_code: parse_or("country-code", get("country-code"), defaults.country_code)?,
            timezone_offset: parse_or(
                "timezone-offset",
                get("timezone-offset"),
                defaults.timezone_offset,
            )?,
            user_agent: get("user-agent")
                .map(str::to_string)
                .unwrap_or(defaults.user_agent),
            proxy_dsn: get("proxy-dsn").map(str::to_string),
            ..defaults
        };

        let mut storage = StorageConfig::default();
        if let Some(path) = get("session-file") {
            storage.session_file = PathBuf::from(path);
        }

        Ok(Config {
            account,
            client,
            storage,
        })
    }

    /// Read a JSON object of named settings and build a configuration from it.
    ///
    /// Numbers and booleans are accepted alongside strings.
    pub fn from_settings_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read settings file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| {
                Error::Config(format!(
                    "Invalid settings file '{}': {}",
                    path.display(),
                    e
                ))
            })?;

        let settings = raw
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => return None,
                    other => other.to_string(),
                };
                Some((key, value))
            })
            .collect();

        Self::from_settings(&settings)
    }
}

fn lookup<'a>(settings: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    settings
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: FromStr>(field: &str, value: Option<&str>, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' is not a valid number", raw),
        }),
    }
}

fn parse_bool(field: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("'{}' is not a boolean", raw),
        }),
    }
}
