//! Message contracts.
//!
//! A message is an immutable value uniquely identified by its concrete type.
//! The two refinements, [`Command`] and [`Query`], carry no methods of their
//! own; they exist so the dispatcher can offer distinct entry points with
//! distinct result semantics.

use std::fmt::Debug;

use serde::Serialize;

/// A value routable by the dispatcher.
///
/// `Serialize` is required so the audit decorator can render any message to
/// a structured form without per-message code.
pub trait Message: Serialize + Debug + Send + Sync + 'static {
    /// Result type produced by this message's handler.
    type Output: Send + 'static;
}

/// A request that may mutate external state.
///
/// Result-less commands use `Output = ()`; commands that yield an identifier
/// or similar value declare it as `Output`.
pub trait Command: Message {}

/// A side-effect-free request that always produces a value.
///
/// Absence is modelled inside `Output` (e.g. an empty collection), never as
/// a missing result.
pub trait Query: Message {}
