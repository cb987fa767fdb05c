//! Composable predicate algebra over domain values.
//!
//! A specification answers one boolean question about a value and combines
//! with and/or/not into new specifications without mutating its operands.
//! Every specification also renders itself as a [`Predicate`], so one
//! declaration drives both in-memory validation and storage-level filtering.
//! The two surfaces must agree for every input: evaluating the rendered
//! predicate through a [`ConditionCatalog`] yields the same boolean as
//! calling `is_satisfied_by` directly.
//!
//! Leaf specifications are deliberately parameterless: a leaf captures one
//! fixed condition under a stable id. Parameterized predicates cannot be
//! reliably combined, cached, or compared across validation and filtering
//! call sites.

mod predicate;

pub use predicate::{ConditionCatalog, Predicate, PredicateError};

/// An immutable predicate over values of type `T`.
pub trait Specification<T>: Send + Sync {
    /// Evaluate in memory.
    fn is_satisfied_by(&self, candidate: &T) -> bool;

    /// Render as an engine-translatable predicate.
    fn to_predicate(&self) -> Predicate;
}

/// Conjunction of two specifications.
#[derive(Debug, Clone)]
pub struct And<A, B> {
    left: A,
    right: B,
}

/// Disjunction of two specifications.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    left: A,
    right: B,
}

/// Negation of a specification.
#[derive(Debug, Clone)]
pub struct Not<A> {
    inner: A,
}

impl<T, A, B> Specification<T> for And<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) && self.right.is_satisfied_by(candidate)
    }

    fn to_predicate(&self) -> Predicate {
        Predicate::And(
            Box::new(self.left.to_predicate()),
            Box::new(self.right.to_predicate()),
        )
    }
}

impl<T, A, B> Specification<T> for Or<A, B>
where
    A: Specification<T>,
    B: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        self.left.is_satisfied_by(candidate) || self.right.is_satisfied_by(candidate)
    }

    fn to_predicate(&self) -> Predicate {
        Predicate::Or(
            Box::new(self.left.to_predicate()),
            Box::new(self.right.to_predicate()),
        )
    }
}

impl<T, A> Specification<T> for Not<A>
where
    A: Specification<T>,
{
    fn is_satisfied_by(&self, candidate: &T) -> bool {
        !self.inner.is_satisfied_by(candidate)
    }

    fn to_predicate(&self) -> Predicate {
        Predicate::Not(Box::new(self.inner.to_predicate()))
    }
}

/// Combinators. Each call consumes its operands into a new composite value;
/// clone a specification to reuse it in several compositions.
pub trait SpecificationExt<T>: Specification<T> + Sized {
    fn and<B: Specification<T>>(self, other: B) -> And<Self, B> {
        And {
            left: self,
            right: other,
        }
    }

    fn or<B: Specification<T>>(self, other: B) -> Or<Self, B> {
        Or {
            left: self,
            right: other,
        }
    }

    fn not(self) -> Not<Self> {
        Not { inner: self }
    }
}

impl<T, S: Specification<T>> SpecificationExt<T> for S {}
