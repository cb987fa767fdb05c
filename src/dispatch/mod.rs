//! Message dispatch: registration phase and the read-only dispatcher.
//!
//! Registration runs once, single-threaded, before any dispatch traffic.
//! [`DispatcherBuilder::build`] freezes the registry; the resulting
//! [`Dispatcher`] is immutable and safe to share across concurrent dispatch
//! calls. Pipelines are built eagerly at registration, so every
//! configuration problem (duplicate handler, unresolved decorator
//! dependency) fails at startup, never mid-dispatch.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::decorator::DecoratorKind;
use crate::error::{ConfigurationError, DispatchError};
use crate::handler::{Handler, HandlerDescriptor};
use crate::message::{Command, Message, Query};
use crate::pipeline::build_pipeline;
use crate::services::ServiceDirectory;

/// Cached, immutable pipeline for one message type.
struct Pipeline<M: Message> {
    head: Arc<dyn Handler<M>>,
}

struct Registration {
    descriptor: HandlerDescriptor,
    // Holds a Pipeline<M>; recovered by downcast keyed on the message TypeId.
    pipeline: Box<dyn Any + Send + Sync>,
}

/// One-time registration phase. Not safe for concurrent mutation.
pub struct DispatcherBuilder {
    services: ServiceDirectory,
    commands: HashMap<TypeId, Registration>,
    queries: HashMap<TypeId, Registration>,
}

impl std::fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("commands", &self.commands.len())
            .field("queries", &self.queries.len())
            .finish_non_exhaustive()
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            services: ServiceDirectory::new(),
            commands: HashMap::new(),
            queries: HashMap::new(),
        }
    }

    /// Register a shared dependency for decorator construction.
    ///
    /// Values must be registered before the handlers whose decorators need
    /// them; pipelines are built eagerly at registration time.
    pub fn with_service<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.services.insert(value);
        self
    }

    /// Bind a command type to its handler and declared decorator chain.
    ///
    /// Decorator order is outermost first. Fails fast on a duplicate
    /// registration or an unresolvable decorator dependency.
    pub fn register_command<C: Command>(
        &mut self,
        handler: impl Handler<C> + 'static,
        decorators: &[DecoratorKind],
    ) -> Result<&mut Self, ConfigurationError> {
        Self::register::<C>(&self.services, &mut self.commands, Arc::new(handler), decorators)?;
        Ok(self)
    }

    /// Bind a query type to its handler and declared decorator chain.
    pub fn register_query<Q: Query>(
        &mut self,
        handler: impl Handler<Q> + 'static,
        decorators: &[DecoratorKind],
    ) -> Result<&mut Self, ConfigurationError> {
        Self::register::<Q>(&self.services, &mut self.queries, Arc::new(handler), decorators)?;
        Ok(self)
    }

    /// Freeze the registry into an immutable dispatcher.
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            commands: self.commands,
            queries: self.queries,
        }
    }

    fn register<M: Message>(
        services: &ServiceDirectory,
        registry: &mut HashMap<TypeId, Registration>,
        handler: Arc<dyn Handler<M>>,
        decorators: &[DecoratorKind],
    ) -> Result<(), ConfigurationError> {
        let type_id = TypeId::of::<M>();
        if registry.contains_key(&type_id) {
            return Err(ConfigurationError::DuplicateHandler {
                message_type: std::any::type_name::<M>(),
            });
        }

        let head = build_pipeline(handler, decorators, services)?;
        let descriptor = HandlerDescriptor::new::<M>(decorators);
        debug!(
            message_type = descriptor.message_type(),
            decorators = decorators.len(),
            "Handler registered"
        );
        registry.insert(
            type_id,
            Registration {
                descriptor,
                pipeline: Box::new(Pipeline { head }),
            },
        );
        Ok(())
    }
}

/// Public dispatch entry point.
///
/// Holds no business logic; resolves the message's concrete type to its
/// cached pipeline and invokes it. Read-only after construction and safe
/// for concurrent use. Dropping an in-flight dispatch future cancels the
/// pipeline call; the cancellation passes through every decorator layer
/// unchanged.
pub struct Dispatcher {
    commands: HashMap<TypeId, Registration>,
    queries: HashMap<TypeId, Registration>,
}

impl Dispatcher {
    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Dispatch a command to its registered pipeline.
    ///
    /// Returns the command's output, an expected rejection with its reason,
    /// or a propagated fault.
    pub async fn dispatch<C: Command>(&self, command: C) -> Result<C::Output, DispatchError> {
        let pipeline = Self::pipeline::<C>(&self.commands)?;
        Ok(pipeline.head.handle(&command).await?)
    }

    /// Dispatch a query to its registered pipeline.
    ///
    /// Queries produce a value or propagate a fault; an empty result set is
    /// an empty value of the output type, never a missing result.
    pub async fn query<Q: Query>(&self, query: Q) -> Result<Q::Output, DispatchError> {
        let pipeline = Self::pipeline::<Q>(&self.queries)?;
        Ok(pipeline.head.handle(&query).await?)
    }

    /// Resolve the descriptor registered for a command type.
    pub fn command_descriptor<C: Command>(&self) -> Option<&HandlerDescriptor> {
        self.commands
            .get(&TypeId::of::<C>())
            .map(|registration| &registration.descriptor)
    }

    /// Resolve the descriptor registered for a query type.
    pub fn query_descriptor<Q: Query>(&self) -> Option<&HandlerDescriptor> {
        self.queries
            .get(&TypeId::of::<Q>())
            .map(|registration| &registration.descriptor)
    }

    fn pipeline<M: Message>(
        registry: &HashMap<TypeId, Registration>,
    ) -> Result<&Pipeline<M>, DispatchError> {
        registry
            .get(&TypeId::of::<M>())
            .and_then(|registration| registration.pipeline.downcast_ref::<Pipeline<M>>())
            .ok_or(DispatchError::NoHandler {
                message_type: std::any::type_name::<M>(),
            })
    }
}
