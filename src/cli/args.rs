//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Post fetcher CLI.
#[derive(Parser, Debug)]
#[command(
    name = "post-fetcher",
    version,
    about = "Download Instagram posts by shortcode or URL",
    long_about = "Fetches single posts (photos, videos, reels, IGTV and albums) into \
                  <data-dir>/<owner>/, reusing a persisted login session.\n\n\
                  Expired sessions, rate limits and network hiccups are recovered \
                  from once per post before giving up."
)]
pub struct Args {
    /// Post shortcodes or URLs.
    #[arg(required = true, num_args = 1..)]
    pub identifiers: Vec<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON file of flat named settings, used instead of the TOML file.
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Account username.
    #[arg(short, long, env = "POST_FETCHER_USERNAME")]
    pub username: Option<String>,

    /// Account password.
    #[arg(short, long, env = "POST_FETCHER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Base32 two-factor seed. Setting it enables two-factor login.
    #[arg(long = "2fa-seed", env = "POST_FETCHER_2FA_SEED", hide_env_values = true)]
    pub two_factor_seed: Option<String>,

    /// Outbound proxy, e.g. socks5://127.0.0.1:1080.
    #[arg(long, env = "POST_FETCHER_PROXY")]
    pub proxy: Option<String>,

    /// Where the login session is persisted.
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    /// Base directory for downloads.
    #[arg(short = 'd', long = "data-dir")]
    pub data_directory: Option<PathBuf>,

    /// Upper bound of the random delay before each API request, in seconds.
    #[arg(long)]
    pub delay_requests: Option<u64>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Errors already counted against these posts by the caller.
    #[arg(long, default_value_t = 0)]
    pub error_count: u32,

    /// Print one JSON outcome per line instead of text.
    #[arg(long)]
    pub json: bool,

    /// Show progress bars for large downloads.
    #[arg(long)]
    pub progress: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(username) = &self.username {
            config.account.username = username.clone();
        }

        if let Some(password) = &self.password {
            config.account.password = password.clone();
        }

        if let Some(seed) = &self.two_factor_seed {
            config.account.two_factor_enabled = true;
            config.account.two_factor_seed = Some(seed.clone());
        }

        if let Some(proxy) = &self.proxy {
            config.client.proxy_dsn = Some(proxy.clone());
        }

        if let Some(path) = &self.session_file {
            config.storage.session_file = path.clone();
        }

        if let Some(dir) = &self.data_directory {
            config.storage.data_directory = dir.clone();
        }

        if let Some(delay) = self.delay_requests {
            config.client.delay_requests = delay;
        }

        if let Some(timeout) = self.timeout {
            config.client.request_timeout = timeout;
        }

        // Only override if set
        if self.progress {
            config.client.show_progress = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers_and_flags() {
        let args = Args::try_parse_from([
            "post-fetcher",
            "ABC123",
            "https://www.instagram.com/reel/XYZ789/",
            "--json",
            "--error-count",
            "2",
        ])
        .unwrap();

        assert_eq!(args.identifiers.len(), 2);
        assert!(args.json);
        assert_eq!(args.error_count, 2);
        assert_eq!(args.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn test_identifier_required() {
        assert!(Args::try_parse_from(["post-fetcher"]).is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let args = Args::try_parse_from([
            "post-fetcher",
            "ABC123",
            "--username",
            "someone",
            "--2fa-seed",
            "JBSWY3DPEHPK3PXP",
            "--data-dir",
            "/tmp/posts",
            "--timeout",
            "30",
            "--progress",
        ])
        .unwrap();

        let mut config = Config::default();
        config.account.password = "from-file".into();
        args.merge_into_config(&mut config);

        assert_eq!(config.account.username, "someone");
        assert_eq!(config.account.password, "from-file");
        assert!(config.account.two_factor_enabled);
        assert_eq!(config.storage.data_directory, PathBuf::from("/tmp/posts"));
        assert_eq!(config.client.request_timeout, 30);
        assert!(config.client.show_progress);
    }
}
