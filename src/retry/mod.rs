//! Classified retry for remote calls.
//!
//! A failed call is classified into a [`FailureKind`], the matching
//! [`RecoveryPlan`] is carried out (wait, re-login, or both), and the call is
//! made exactly one more time. A second failure propagates as is.

pub mod classify;
pub mod policy;
pub mod sleeper;

use std::future::Future;
use std::sync::Arc;

use crate::auth::Reauthenticate;
use crate::error::Result;

pub use classify::{Classifier, FailureKind, ServiceClassifier};
pub use policy::{RecoveryPlan, RecoveryTable, LONG_BACKOFF, SHORT_BACKOFF};
pub use sleeper::{Sleeper, TokioSleeper};

/// Wraps operations with one classify-and-recover pass.
#[derive(Clone)]
pub struct ResilientCaller {
    classifier: Arc<dyn Classifier>,
    table: RecoveryTable,
    auth: Arc<dyn Reauthenticate>,
    sleeper: Arc<dyn Sleeper>,
}

impl ResilientCaller {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        table: RecoveryTable,
        auth: Arc<dyn Reauthenticate>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            classifier,
            table,
            auth,
            sleeper,
        }
    }

    /// Default classifier and table, real sleeps.
    pub fn with_defaults(auth: Arc<dyn Reauthenticate>) -> Self {
        Self::new(
            Arc::new(ServiceClassifier),
            RecoveryTable::default(),
            auth,
            Arc::new(TokioSleeper),
        )
    }

    /// Run `operation`, recovering from one classified failure.
    ///
    /// Errors raised by the recovery itself (a failed re-login) propagate and
    /// the second attempt is not made.
    pub async fn call<T, F, Fut>(&self, name: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        let kind = self.classifier.classify(&error);
        let Some(plan) = self.table.plan_for(kind) else {
            tracing::debug!(operation = name, "Not retrying unclassified failure: {}", error);
            return Err(error);
        };

        tracing::error!(
            operation = name,
            kind = %kind,
            wait = ?plan.wait,
            relogin = ?plan.relogin,
            "{}. Recovering before one retry",
            error
        );

        self.recover(plan).await?;

        tracing::info!(operation = name, "Retrying after {} recovery", kind);
        operation().await
    }

    async fn recover(&self, plan: RecoveryPlan) -> Result<()> {
        if let Some(wait) = plan.wait {
            self.sleeper.sleep(wait).await;
        }
        if let Some(mode) = plan.relogin {
            self.auth.reauthenticate(mode).await?;
        }
        Ok(())
    }
}
