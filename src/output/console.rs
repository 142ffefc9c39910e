//! Console output utilities.

use console::style;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{FetchOutcome, FetchStatus};

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("OK").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     post-fetcher                                      ║
║     Single-post downloader with resilient sessions    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary. Secrets are never shown.
pub fn print_config_summary(config: &Config) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Account: {}", config.account.username);
    println!(
        "  Two-factor: {}",
        if config.account.two_factor_enabled {
            "enabled"
        } else {
            "disabled"
        }
    );
    println!("  Data directory: {}", config.storage.data_directory.display());
    println!("  Session file: {}", config.storage.session_file.display());
    if config.client.proxy_dsn.is_some() {
        println!("  Proxy: configured");
    }
    println!();
}

/// Print one outcome as a human-readable line.
pub fn print_outcome(outcome: &FetchOutcome) {
    let line = format!(
        "{} by {} ({})",
        outcome.post, outcome.owner, outcome.content_type
    );
    match outcome.status {
        FetchStatus::Completed => print_success(&line),
        FetchStatus::NotSupported => print_warning(&format!("{}: not supported", line)),
        FetchStatus::SourceNotFound => {
            print_warning(&format!("{}: source not found", outcome.post))
        }
        FetchStatus::Failed => print_error(&format!("{}: nothing was written", line)),
    }
}

/// Print one outcome as a JSON line.
pub fn print_outcome_json(outcome: &FetchOutcome) -> Result<()> {
    println!("{}", serde_json::to_string(outcome)?);
    Ok(())
}
