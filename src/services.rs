//! Ambient service directory for decorator dependencies.

use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-keyed directory of shared dependencies available to decorator
/// constructors.
///
/// Populated during the single-threaded setup phase and consulted only while
/// pipelines are built, never at dispatch time. Anything registered here must
/// itself be immutable or independently concurrency-safe, since the same
/// value is cloned into every pipeline that needs it.
#[derive(Default)]
pub struct ServiceDirectory {
    entries: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dependency, replacing any previous value of the same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) {
        self.entries.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Fetch a clone of a registered dependency.
    pub fn get<T: Clone + Send + Sync + 'static>(&self) -> Option<T> {
        self.entries
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<T>())
            .cloned()
    }
}
