//! post-fetcher - CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use post_fetcher::{
    cli::Args,
    config::{validate_config, Config},
    error::{exit_codes, Error, Result},
    fetch::connect,
    output::{
        create_spinner, print_banner, print_config_summary, print_error, print_info,
        print_outcome, print_outcome_json, print_summary, print_warning, FetchSummary,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(exit_code_for(&e) as u8)
        }
    }
}

fn exit_code_for(error: &Error) -> i32 {
    match error {
        e if e.is_config() => exit_codes::CONFIG_ERROR,
        Error::Authentication(_)
        | Error::TwoFactor(_)
        | Error::LoginRequired(_)
        | Error::ChallengeRequired(_)
        | Error::PleaseWaitFewMinutes(_)
        | Error::Timeout(_)
        | Error::Connection(_)
        | Error::Api(_)
        | Error::Http(_) => exit_codes::API_ERROR,
        Error::TooManyErrors { .. } | Error::Download(_) => exit_codes::DOWNLOAD_ERROR,
        _ => exit_codes::UNEXPECTED_ERROR,
    }
}

async fn run() -> Result<i32> {
    // Parse CLI arguments
    let args = Args::parse();

    // Logs go to stderr so `--json` output stays clean
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if !args.json {
        print_banner();
    }

    let mut config = load_config(&args)?;
    args.merge_into_config(&mut config);
    validate_config(&config)?;

    if !args.json {
        print_config_summary(&config);
    }

    let spinner = (!args.json).then(|| create_spinner("Logging in..."));
    let connected = connect(&config).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let fetcher = connected?;

    let mut summary = FetchSummary::default();
    let mut last_error = None;

    for identifier in &args.identifiers {
        match fetcher
            .fetch_with_error_count(identifier, args.error_count)
            .await
        {
            Ok(outcome) => {
                summary.record(&outcome);
                if args.json {
                    print_outcome_json(&outcome)?;
                } else {
                    print_outcome(&outcome);
                }
            }
            Err(e) => {
                print_error(&format!("Failed to fetch {}: {}", identifier, e));
                summary.record_error();
                last_error = Some(e);
            }
        }
    }

    if !args.json {
        print_summary(&summary);
    }

    Ok(batch_exit_code(&summary, last_error.as_ref()))
}

/// Exit code for a finished batch. Errors were already printed per post.
fn batch_exit_code(summary: &FetchSummary, last_error: Option<&Error>) -> i32 {
    match last_error {
        // Nothing succeeded: the error decides the code.
        Some(e) if summary.errors == summary.total() => exit_code_for(e),
        _ if summary.has_failures() => exit_codes::SOME_POSTS_FAILED,
        _ => exit_codes::SUCCESS,
    }
}

fn load_config(args: &Args) -> Result<Config> {
    if let Some(settings) = &args.settings {
        return Config::from_settings_file(settings);
    }

    if args.config.exists() {
        return Config::load(&args.config);
    }

    if !args.json {
        print_warning(&format!(
            "Configuration file not found: {}",
            args.config.display()
        ));
        print_info("Using default configuration with CLI arguments");
    }
    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use post_fetcher::fetch::{FetchOutcome, FetchStatus};

    #[test]
    fn test_all_failed_uses_error_code() {
        let mut summary = FetchSummary::default();
        summary.record_error();
        summary.record_error();
        let err = Error::Authentication("bad password".into());
        assert_eq!(
            batch_exit_code(&summary, Some(&err)),
            exit_codes::API_ERROR
        );

        let err = Error::TooManyErrors {
            identifier: "ABC123".into(),
            error_count: 4,
        };
        assert_eq!(
            batch_exit_code(&summary, Some(&err)),
            exit_codes::DOWNLOAD_ERROR
        );
    }

    #[test]
    fn test_partial_failure() {
        let mut summary = FetchSummary::default();
        summary.record(&FetchOutcome::new(
            "ABC123",
            "someone",
            "photo",
            FetchStatus::Completed,
        ));
        summary.record_error();
        let err = Error::Download("connection reset".into());
        assert_eq!(
            batch_exit_code(&summary, Some(&err)),
            exit_codes::SOME_POSTS_FAILED
        );
    }

    #[test]
    fn test_clean_batch() {
        let mut summary = FetchSummary::default();
        summary.record(&FetchOutcome::source_not_found("gone"));
        assert_eq!(batch_exit_code(&summary, None), exit_codes::SUCCESS);
        assert_eq!(
            batch_exit_code(&FetchSummary::default(), None),
            exit_codes::SUCCESS
        );
    }
}
