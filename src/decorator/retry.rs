//! Retry decorator: bounded re-invocation on transient faults.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::config::RetryConfig;
use crate::error::HandlerError;
use crate::handler::Handler;
use crate::message::Message;

/// Wraps a handler with bounded retry on transient infrastructure faults.
///
/// Only failures matching the closed transient classification are retried;
/// rejections and unclassified faults propagate immediately. Exhausting the
/// budget surfaces the last transient fault unchanged, never a wrapped
/// "retries exhausted" error, so the caller-visible taxonomy stays stable.
///
/// Attempts are strictly sequential; there is never a concurrent in-flight
/// duplicate of the same call.
pub struct RetryDecorator<M: Message> {
    inner: Arc<dyn Handler<M>>,
    config: RetryConfig,
}

impl<M: Message> RetryDecorator<M> {
    pub fn new(inner: Arc<dyn Handler<M>>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<M: Message> Handler<M> for RetryDecorator<M> {
    async fn handle(&self, message: &M) -> Result<M::Output, HandlerError> {
        let mut attempt = 0;
        loop {
            match self.inner.handle(message).await {
                Ok(output) => return Ok(output),
                Err(e) if e.is_transient() && self.config.should_retry(attempt) => {
                    let delay = self.config.delay_for_attempt(attempt);
                    warn!(
                        message_type = std::any::type_name::<M>(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient fault, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
