//! Handler contract and registration descriptors.

use std::any::TypeId;

use async_trait::async_trait;

use crate::decorator::DecoratorKind;
use crate::error::HandlerError;
use crate::message::Message;

/// Uniform handling capability shared by concrete handlers and decorators.
///
/// A built pipeline exposes exactly this contract, so callers cannot tell a
/// bare handler from a fully decorated chain. Handlers must not re-enter the
/// dispatcher; shared logic belongs in plain domain functions, never in a
/// nested dispatch, which would re-run every decorator.
#[async_trait]
pub trait Handler<M: Message>: Send + Sync {
    async fn handle(&self, message: &M) -> Result<M::Output, HandlerError>;
}

impl<M: Message> std::fmt::Debug for dyn Handler<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Handler")
    }
}

/// Binds one message type to its handler's declared decorator chain.
///
/// Decorator order is as declared at registration: the first entry is the
/// outermost wrapper at dispatch time.
#[derive(Debug, Clone)]
pub struct HandlerDescriptor {
    message_type: &'static str,
    type_id: TypeId,
    decorators: Vec<DecoratorKind>,
}

impl HandlerDescriptor {
    pub(crate) fn new<M: Message>(decorators: &[DecoratorKind]) -> Self {
        Self {
            message_type: std::any::type_name::<M>(),
            type_id: TypeId::of::<M>(),
            decorators: decorators.to_vec(),
        }
    }

    /// Fully qualified name of the message type this handler serves.
    pub fn message_type(&self) -> &'static str {
        self.message_type
    }

    /// Type identity used for registry lookup.
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Declared decorators, outermost first.
    pub fn decorators(&self) -> &[DecoratorKind] {
        &self.decorators
    }
}
