//! Audit logging decorator.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::info;

use crate::error::HandlerError;
use crate::handler::Handler;
use crate::message::Message;

/// A recorded dispatch in a structured, inspectable form.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    /// Fully qualified message type name.
    pub message_type: &'static str,
    /// Message rendered as JSON.
    pub payload: Value,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Collaborator receiving audit entries.
///
/// The crate ships a tracing-backed sink; deployments substitute their own
/// by registering a different `Arc<dyn AuditSink>` in the service directory.
pub trait AuditSink: Send + Sync {
    fn record(&self, entry: AuditEntry);
}

/// Default sink: emits entries as structured tracing events.
#[derive(Debug, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, entry: AuditEntry) {
        info!(
            message_type = entry.message_type,
            payload = %entry.payload,
            recorded_at = %entry.recorded_at.to_rfc3339(),
            "Message dispatched"
        );
    }
}

/// Records the inbound message before invoking the inner handler, then
/// returns the inner result untouched. Never swallows or alters a failure.
pub struct AuditDecorator<M: Message> {
    inner: Arc<dyn Handler<M>>,
    sink: Arc<dyn AuditSink>,
}

impl<M: Message> AuditDecorator<M> {
    pub fn new(inner: Arc<dyn Handler<M>>, sink: Arc<dyn AuditSink>) -> Self {
        Self { inner, sink }
    }
}

#[async_trait]
impl<M: Message> Handler<M> for AuditDecorator<M> {
    async fn handle(&self, message: &M) -> Result<M::Output, HandlerError> {
        let payload = match serde_json::to_value(message) {
            Ok(value) => value,
            Err(e) => Value::String(format!("<unserializable: {e}>")),
        };
        self.sink.record(AuditEntry {
            message_type: std::any::type_name::<M>(),
            payload,
            recorded_at: Utc::now(),
        });
        self.inner.handle(message).await
    }
}
