//! Recovery actions per failure kind.

use std::collections::HashMap;
use std::time::Duration;

use crate::auth::LoginMode;
use crate::retry::classify::FailureKind;

/// Suspension before retrying after a challenge or a restriction.
pub const LONG_BACKOFF: Duration = Duration::from_secs(60 * 60);

/// Suspension before retrying after a timeout.
pub const SHORT_BACKOFF: Duration = Duration::from_secs(60);

/// What to do before the single retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryPlan {
    /// Suspend this long first.
    pub wait: Option<Duration>,
    /// Then log in again this way.
    pub relogin: Option<LoginMode>,
}

impl RecoveryPlan {
    pub fn relogin(mode: LoginMode) -> Self {
        Self {
            wait: None,
            relogin: Some(mode),
        }
    }

    pub fn wait(duration: Duration) -> Self {
        Self {
            wait: Some(duration),
            relogin: None,
        }
    }

    pub fn wait_then_relogin(duration: Duration, mode: LoginMode) -> Self {
        Self {
            wait: Some(duration),
            relogin: Some(mode),
        }
    }
}

/// Failure kind → recovery plan. Kinds without an entry propagate.
#[derive(Debug, Clone)]
pub struct RecoveryTable {
    plans: HashMap<FailureKind, RecoveryPlan>,
}

impl RecoveryTable {
    /// Table with custom backoff durations.
    pub fn with_backoff(long: Duration, short: Duration) -> Self {
        let plans = HashMap::from([
            (FailureKind::AuthExpired, RecoveryPlan::relogin(LoginMode::Renew)),
            (
                FailureKind::ChallengeRequired,
                RecoveryPlan::wait_then_relogin(long, LoginMode::Resume),
            ),
            (
                FailureKind::RateLimited,
                RecoveryPlan::wait_then_relogin(long, LoginMode::Renew),
            ),
            (FailureKind::Transient, RecoveryPlan::wait(short)),
        ]);
        Self { plans }
    }

    pub fn plan_for(&self, kind: FailureKind) -> Option<RecoveryPlan> {
        self.plans.get(&kind).copied()
    }
}

impl Default for RecoveryTable {
    fn default() -> Self {
        Self::with_backoff(LONG_BACKOFF, SHORT_BACKOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = RecoveryTable::default();

        assert_eq!(
            table.plan_for(FailureKind::AuthExpired),
            Some(RecoveryPlan {
                wait: None,
                relogin: Some(LoginMode::Renew)
            })
        );
        assert_eq!(
            table.plan_for(FailureKind::ChallengeRequired),
            Some(RecoveryPlan {
                wait: Some(Duration::from_secs(3600)),
                relogin: Some(LoginMode::Resume)
            })
        );
        assert_eq!(
            table.plan_for(FailureKind::RateLimited),
            Some(RecoveryPlan {
                wait: Some(Duration::from_secs(3600)),
                relogin: Some(LoginMode::Renew)
            })
        );
        assert_eq!(
            table.plan_for(FailureKind::Transient),
            Some(RecoveryPlan {
                wait: Some(Duration::from_secs(60)),
                relogin: None
            })
        );
        assert_eq!(table.plan_for(FailureKind::Unclassified), None);
    }
}
