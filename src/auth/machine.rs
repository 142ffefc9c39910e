//! Login state machine.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use crate::api::service::{AuthClient, LoginArgs};
use crate::auth::totp::generate_code;
use crate::auth::{AuthState, Credentials, LoginMode, Reauthenticate};
use crate::error::{Error, Result};
use crate::session::{Session, SessionStore};

/// Owns the login lifecycle of one account.
///
/// One instance holds exactly one live session. `login(Renew)` replaces it in
/// place, so an instance must not be shared by concurrent fetches without
/// external serialization.
pub struct AuthStateMachine {
    client: Arc<dyn AuthClient>,
    store: SessionStore,
    credentials: Credentials,
    state: RwLock<AuthState>,
    login_lock: Mutex<()>,
}

impl AuthStateMachine {
    pub fn new(client: Arc<dyn AuthClient>, store: SessionStore, credentials: Credentials) -> Self {
        Self {
            client,
            store,
            credentials,
            state: RwLock::new(AuthState::Unauthenticated),
            login_lock: Mutex::new(()),
        }
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> AuthState {
        *self.state.read().await
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Log in and confirm the session with one authenticated read.
    ///
    /// Errors propagate unchanged; this method never retries on its own.
    pub async fn login(&self, mode: LoginMode) -> Result<()> {
        let _guard = self.login_lock.lock().await;

        let previous = self.state().await;
        let transitional = match (mode, previous) {
            (LoginMode::Renew, AuthState::Authenticated) => AuthState::Renewing,
            _ => AuthState::Authenticating,
        };
        self.set_state(transitional).await;

        match self.run_login(mode).await {
            Ok(()) => {
                self.set_state(AuthState::Authenticated).await;
                tracing::info!(
                    "Authentication as {} was successful",
                    self.credentials.username
                );
                Ok(())
            }
            Err(e) => {
                self.set_state(AuthState::Unauthenticated).await;
                tracing::error!(mode = %mode, "Authentication failed: {}", e);
                Err(e)
            }
        }
    }

    async fn run_login(&self, mode: LoginMode) -> Result<()> {
        tracing::info!(mode = %mode, "Authenticating as {}", self.credentials.username);
        let args = self.login_args()?;

        match mode {
            LoginMode::Resume if self.store.exists().await => {
                if let Some(created_at) = self.store.created_at().await {
                    tracing::info!(
                        "Loading session file with creation date {}",
                        created_at.format("%Y-%m-%d %H:%M:%S")
                    );
                }
                let session = self.store.load().await?;
                self.client.set_session(session).await;
                self.client.login(&args).await?;
                self.verify().await?;
            }
            LoginMode::Renew => {
                let old = self.client.session().await;
                tracing::info!("Renewing session, keeping device {}", old.device.uuid);
                self.client.set_session(Session::renewed_from(&old)).await;
                self.client.login(&args).await?;
                self.verify().await?;
                self.store.save(&self.client.session().await).await?;
            }
            LoginMode::Resume | LoginMode::Fresh => {
                tracing::info!("Creating a new session file {}", self.store.path().display());
                self.client.set_session(Session::new()).await;
                self.client.login(&args).await?;
                self.verify().await?;
                self.store.save(&self.client.session().await).await?;
            }
        }

        Ok(())
    }

    /// Build login arguments, deriving a new one-time code every time.
    fn login_args(&self) -> Result<LoginArgs> {
        let verification_code = match &self.credentials.two_factor_seed {
            Some(seed) => {
                let now = Utc::now().timestamp().max(0) as u64;
                tracing::info!("Two-factor authentication is enabled, generated a fresh code");
                Some(generate_code(seed, now)?)
            }
            None => None,
        };

        Ok(LoginArgs {
            username: self.credentials.username.clone(),
            password: self.credentials.password.clone(),
            verification_code,
        })
    }

    async fn verify(&self) -> Result<()> {
        if !self.client.session().await.is_authorized() {
            return Err(Error::Authentication(
                "login reported success but no authorization was issued".into(),
            ));
        }

        tracing::debug!("Checking the session with a timeline read");
        self.client.timeline_feed().await.map_err(|e| {
            Error::Authentication(format!(
                "login reported success but the session is not usable: {}",
                e
            ))
        })
    }

    async fn set_state(&self, state: AuthState) {
        let mut current = self.state.write().await;
        tracing::debug!("Auth state {} -> {}", *current, state);
        *current = state;
    }
}

#[async_trait]
impl Reauthenticate for AuthStateMachine {
    async fn reauthenticate(&self, mode: LoginMode) -> Result<()> {
        self.login(mode).await
    }
}
