//! Content fetching.
//!
//! This module provides:
//! - The fetch orchestrator (resolve, dispatch, download, verify)
//! - Outcome records reported for every fetched post
//! - `connect`, which wires a live fetcher from configuration

pub mod orchestrator;
pub mod outcome;

use std::sync::Arc;

use crate::api::InstagramApi;
use crate::auth::{AuthStateMachine, Credentials, LoginMode};
use crate::config::{validate_config, Config};
use crate::error::{Error, Result};
use crate::retry::ResilientCaller;
use crate::session::SessionStore;

pub use orchestrator::{ContentFetcher, MAX_ERROR_COUNT};
pub use outcome::{FetchOutcome, FetchStatus, UNDEFINED};

/// Build a fetcher from configuration and establish the session.
///
/// The initial login resumes the persisted session when there is one and runs
/// under the same classified retry as every other remote call. A login that
/// still fails afterwards is reported as `Authentication`.
pub async fn connect(config: &Config) -> Result<ContentFetcher> {
    validate_config(config)?;

    let api = Arc::new(InstagramApi::new(config.client.clone())?);
    let store = SessionStore::new(&config.storage.session_file);
    let machine = Arc::new(AuthStateMachine::new(
        api.clone(),
        store,
        Credentials::from(&config.account),
    ));
    let caller = ResilientCaller::with_defaults(machine.clone());

    establish(&machine, &caller).await?;

    Ok(ContentFetcher::new(
        api,
        caller,
        config.storage.data_directory.clone(),
    ))
}

async fn establish(machine: &AuthStateMachine, caller: &ResilientCaller) -> Result<()> {
    tracing::info!("Logging in as {}", machine.username());

    caller
        .call("login", || machine.login(LoginMode::Resume))
        .await
        .map_err(|e| match e {
            e @ Error::Authentication(_) => e,
            e if e.is_config() => e,
            other => Error::Authentication(other.to_string()),
        })
}
