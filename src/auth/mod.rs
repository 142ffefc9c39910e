//! Authentication lifecycle.
//!
//! This module provides:
//! - The login state machine (resume, fresh and renew logins)
//! - Two-factor code generation
//! - The re-authentication capability used by the retry engine

pub mod machine;
pub mod totp;

use std::fmt;

use async_trait::async_trait;

use crate::config::AccountConfig;
use crate::error::Result;

pub use machine::AuthStateMachine;

/// How a login treats the existing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    /// Reuse the persisted session if there is one.
    Resume,
    /// Ignore any persisted session and start from scratch.
    Fresh,
    /// Keep the device identity, drop everything else, log in again.
    Renew,
}

impl fmt::Display for LoginMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginMode::Resume => write!(f, "resume"),
            LoginMode::Fresh => write!(f, "fresh"),
            LoginMode::Renew => write!(f, "renew"),
        }
    }
}

/// Login lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    Unauthenticated,
    Authenticating,
    Authenticated,
    Renewing,
}

impl fmt::Display for AuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthState::Unauthenticated => write!(f, "unauthenticated"),
            AuthState::Authenticating => write!(f, "authenticating"),
            AuthState::Authenticated => write!(f, "authenticated"),
            AuthState::Renewing => write!(f, "renewing"),
        }
    }
}

/// Account credentials, fixed for the process lifetime.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Base32 seed; `Some` only when two-factor is enabled.
    pub two_factor_seed: Option<String>,
}

impl From<&AccountConfig> for Credentials {
    fn from(account: &AccountConfig) -> Self {
        Self {
            username: account.username.clone(),
            password: account.password.clone(),
            two_factor_seed: if account.two_factor_enabled {
                account.two_factor_seed.clone()
            } else {
                None
            },
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("two_factor", &self.two_factor_seed.is_some())
            .finish()
    }
}

/// Ability to re-establish a session, used as a recovery action.
#[async_trait]
pub trait Reauthenticate: Send + Sync {
    async fn reauthenticate(&self, mode: LoginMode) -> Result<()>;
}
