//! Failure classification for remote calls.

use std::fmt;
use std::io::ErrorKind;

use crate::error::Error;

/// What kind of failure a remote call raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Session or login no longer valid.
    AuthExpired,
    /// The service demands interactive verification.
    ChallengeRequired,
    /// Device or IP temporarily restricted.
    RateLimited,
    /// Timeout or connection reset.
    Transient,
    /// Anything else; propagated as is.
    Unclassified,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::AuthExpired => write!(f, "auth expired"),
            FailureKind::ChallengeRequired => write!(f, "challenge required"),
            FailureKind::RateLimited => write!(f, "rate limited"),
            FailureKind::Transient => write!(f, "transient"),
            FailureKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// Maps an error to a [`FailureKind`].
pub trait Classifier: Send + Sync {
    fn classify(&self, error: &Error) -> FailureKind;
}

/// Classification table for the private API client.
///
/// | Error | Kind |
/// |-------|------|
/// | `LoginRequired` | AuthExpired |
/// | `ChallengeRequired` | ChallengeRequired |
/// | `PleaseWaitFewMinutes` | RateLimited |
/// | `Timeout`, `Connection`, reqwest timeout/connect, io timeout/reset | Transient |
/// | anything else | Unclassified |
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceClassifier;

impl Classifier for ServiceClassifier {
    fn classify(&self, error: &Error) -> FailureKind {
        match error {
            Error::LoginRequired(_) => FailureKind::AuthExpired,
            Error::ChallengeRequired(_) => FailureKind::ChallengeRequired,
            Error::PleaseWaitFewMinutes(_) => FailureKind::RateLimited,
            Error::Timeout(_) | Error::Connection(_) => FailureKind::Transient,
            Error::Http(e) if e.is_timeout() || e.is_connect() => FailureKind::Transient,
            Error::Io(e) if is_transient_io(e.kind()) => FailureKind::Transient,
            _ => FailureKind::Unclassified,
        }
    }
}

fn is_transient_io(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::TimedOut | ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted
    )
}
