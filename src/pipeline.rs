//! Pipeline composition.
//!
//! A pipeline is the concrete handler wrapped by its declared decorators,
//! collapsed into a single [`Handler`]. Declared order is outermost first:
//! the list is folded in reverse so the innermost wrapper is constructed
//! first and each decorator takes ownership of the chain built so far. The
//! order is observable - audit-outside-retry logs once per dispatch,
//! retry-outside-audit logs once per attempt.

use std::sync::Arc;

use crate::decorator::{self, DecoratorKind};
use crate::error::ConfigurationError;
use crate::handler::Handler;
use crate::message::Message;
use crate::services::ServiceDirectory;

/// Compose `handler` with `decorators` (outermost first).
///
/// Fails with a [`ConfigurationError`] if any decorator dependency cannot be
/// resolved from the service directory. With an empty decorator list the
/// handler itself is the pipeline.
pub(crate) fn build_pipeline<M: Message>(
    handler: Arc<dyn Handler<M>>,
    decorators: &[DecoratorKind],
    services: &ServiceDirectory,
) -> Result<Arc<dyn Handler<M>>, ConfigurationError> {
    let mut head = handler;
    for kind in decorators.iter().rev() {
        head = decorator::wrap(*kind, head, services)?;
    }
    Ok(head)
}
