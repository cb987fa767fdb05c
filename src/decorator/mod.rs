//! Cross-cutting decorators and the catalog mapping declared kinds to
//! constructors.
//!
//! Decorators implement the identical [`Handler`] contract as the handler
//! they wrap. The kind set is closed: adding a behaviour means adding a
//! variant to [`DecoratorKind`] and a constructor arm to [`wrap`], nothing
//! is discovered implicitly.

pub mod audit;
pub mod retry;

pub use audit::{AuditDecorator, AuditEntry, AuditSink, TracingAuditSink};
pub use retry::RetryDecorator;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::RetryConfig;
use crate::error::ConfigurationError;
use crate::handler::Handler;
use crate::message::Message;
use crate::services::ServiceDirectory;

/// A declared cross-cutting behaviour.
///
/// Carries no handler-specific data; behaviour configuration (retry budget,
/// backoff shape) is resolved from the service directory at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoratorKind {
    /// Bounded re-invocation on transient infrastructure faults.
    Retry,
    /// Structured record of every inbound message before handling.
    AuditLog,
}

impl DecoratorKind {
    /// Parse a kind from its configuration name.
    pub fn from_name(name: &str) -> Result<Self, ConfigurationError> {
        match name {
            "retry" => Ok(Self::Retry),
            "audit_log" => Ok(Self::AuditLog),
            other => Err(ConfigurationError::UnknownDecorator(other.to_string())),
        }
    }

    /// Configuration name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Retry => "retry",
            Self::AuditLog => "audit_log",
        }
    }
}

impl fmt::Display for DecoratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wrap `inner` with the decorator realising `kind`.
///
/// The inner handler is injected by ownership; every other dependency must
/// resolve from the service directory or construction fails with
/// [`ConfigurationError::UnresolvedDependency`].
pub(crate) fn wrap<M: Message>(
    kind: DecoratorKind,
    inner: Arc<dyn Handler<M>>,
    services: &ServiceDirectory,
) -> Result<Arc<dyn Handler<M>>, ConfigurationError> {
    match kind {
        DecoratorKind::Retry => {
            let config: RetryConfig =
                services
                    .get()
                    .ok_or(ConfigurationError::UnresolvedDependency {
                        decorator: "Retry",
                        dependency: "RetryConfig",
                    })?;
            Ok(Arc::new(RetryDecorator::new(inner, config)))
        }
        DecoratorKind::AuditLog => {
            let sink: Arc<dyn AuditSink> =
                services
                    .get()
                    .ok_or(ConfigurationError::UnresolvedDependency {
                        decorator: "AuditLog",
                        dependency: "AuditSink",
                    })?;
            Ok(Arc::new(AuditDecorator::new(inner, sink)))
        }
    }
}
