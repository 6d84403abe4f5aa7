//! Retry policies for failed attempts.
//!
//! The executor consults a [`RetryPolicy`] after every failed attempt. Only
//! transport and HTTP failures reach the policy; signing and validation
//! errors are returned before anything is sent.

use std::fmt;

/// Outcome of one attempt that did not produce a successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The request never produced a response (connect, TLS, timeout, ...).
    Transport(String),
    /// The vendor answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Status { status, .. } => write!(f, "HTTP {status}"),
        }
    }
}

/// Decides whether a failed call is tried again in the fallback environment.
pub trait RetryPolicy: Send + Sync + fmt::Debug {
    /// Upper bound on attempts per call, including the first.
    fn max_attempts(&self) -> usize;

    /// Whether `failure` warrants another attempt.
    fn should_retry(&self, failure: &AttemptFailure) -> bool;
}

/// Retry once in the other environment after any transport or HTTP failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvironmentFallback;

impl RetryPolicy for EnvironmentFallback {
    fn max_attempts(&self) -> usize {
        2
    }

    fn should_retry(&self, _failure: &AttemptFailure) -> bool {
        true
    }
}

/// Never retry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRetry;

impl RetryPolicy for NoRetry {
    fn max_attempts(&self) -> usize {
        1
    }

    fn should_retry(&self, _failure: &AttemptFailure) -> bool {
        false
    }
}
