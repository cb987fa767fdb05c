//! Error taxonomy for registration and dispatch.
//!
//! Configuration problems are fatal and surface during the one-time setup
//! phase; they never appear at dispatch time. Failures flowing through a
//! pipeline keep their category end to end: decorators must not convert a
//! rejection into a fault or an exhausted transient fault into a rejection.

use thiserror::Error;

/// Fatal errors raised while registering handlers and building pipelines.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("duplicate handler for message type '{message_type}'")]
    DuplicateHandler { message_type: &'static str },

    #[error("unknown decorator kind '{0}'")]
    UnknownDecorator(String),

    #[error("decorator '{decorator}' requires '{dependency}', not found in service directory")]
    UnresolvedDependency {
        decorator: &'static str,
        dependency: &'static str,
    },
}

/// Infrastructure faults classified as likely to succeed on retry.
///
/// This is a closed set. Only these kinds are ever eligible for retry;
/// everything else propagates immediately.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransientFault {
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    #[error("could not establish connection: {0}")]
    ConnectionUnavailable(String),
}

/// Uniform failure type flowing through handler pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Expected business-rule failure with a human-readable reason.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Retryable infrastructure fault.
    #[error(transparent)]
    Transient(#[from] TransientFault),

    /// Unclassified fault. Propagated immediately, never retried.
    #[error("fault: {0}")]
    Fault(String),
}

impl HandlerError {
    /// Expected domain failure.
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected(reason.into())
    }

    /// Unclassified fault.
    pub fn fault(detail: impl Into<String>) -> Self {
        Self::Fault(detail.into())
    }

    /// True only for the closed transient classification.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Errors surfaced to dispatch callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("no handler registered for message type '{message_type}'")]
    NoHandler { message_type: &'static str },

    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl DispatchError {
    /// The human-readable reason if this is an expected domain rejection.
    pub fn rejection(&self) -> Option<&str> {
        match self {
            Self::Handler(HandlerError::Rejected(reason)) => Some(reason),
            _ => None,
        }
    }
}
