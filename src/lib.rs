//! Switchyard - typed message dispatch.
//!
//! Routes command and query values to exactly one handler chosen by the
//! value's concrete type, wrapping each handler in an ordered chain of
//! cross-cutting decorators declared at registration time. Also provides
//! a composable specification algebra with dual evaluation surfaces.

pub mod config;
pub mod decorator;
pub mod dispatch;
pub mod error;
pub mod handler;
pub mod message;
pub mod pipeline;
pub mod services;
pub mod specification;
pub mod telemetry;

pub use config::{Config, RetryConfig};
pub use decorator::{AuditEntry, AuditSink, DecoratorKind, TracingAuditSink};
pub use dispatch::{Dispatcher, DispatcherBuilder};
pub use error::{ConfigurationError, DispatchError, HandlerError, TransientFault};
pub use handler::{Handler, HandlerDescriptor};
pub use message::{Command, Message, Query};
pub use services::ServiceDirectory;
pub use specification::{ConditionCatalog, Predicate, Specification, SpecificationExt};
