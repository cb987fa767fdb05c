//! Engine-translatable predicate representation.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

/// Tagged predicate tree handed to query collaborators.
///
/// Leaves carry stable condition ids; the consumer decides how each id maps
/// to storage syntax. The crate guarantees only logical equivalence with the
/// originating specification, never a particular storage-level rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Leaf(&'static str),
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Not(Box<Predicate>),
}

/// Errors walking a predicate tree.
#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("no condition registered for id '{0}'")]
    UnknownCondition(&'static str),
}

/// Maps leaf condition ids to evaluation closures so a predicate tree can be
/// walked locally.
///
/// This is the in-process stand-in for the external query engine; it exists
/// so the agreement between `is_satisfied_by` and the translated form is
/// checkable without a storage backend.
pub struct ConditionCatalog<T> {
    conditions: HashMap<&'static str, Box<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T> ConditionCatalog<T> {
    pub fn new() -> Self {
        Self {
            conditions: HashMap::new(),
        }
    }

    /// Bind a condition id to its evaluation closure, replacing any previous
    /// binding for the same id.
    pub fn register(
        &mut self,
        id: &'static str,
        condition: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) {
        self.conditions.insert(id, Box::new(condition));
    }

    /// Walk the predicate tree against a candidate value.
    pub fn evaluate(&self, predicate: &Predicate, candidate: &T) -> Result<bool, PredicateError> {
        match predicate {
            Predicate::Leaf(id) => self
                .conditions
                .get(id)
                .map(|condition| condition(candidate))
                .ok_or(PredicateError::UnknownCondition(id)),
            Predicate::And(left, right) => {
                Ok(self.evaluate(left, candidate)? && self.evaluate(right, candidate)?)
            }
            Predicate::Or(left, right) => {
                Ok(self.evaluate(left, candidate)? || self.evaluate(right, candidate)?)
            }
            Predicate::Not(inner) => Ok(!self.evaluate(inner, candidate)?),
        }
    }
}

impl<T> Default for ConditionCatalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even() -> Predicate {
        Predicate::Leaf("even")
    }

    fn positive() -> Predicate {
        Predicate::Leaf("positive")
    }

    fn catalog() -> ConditionCatalog<i64> {
        let mut catalog = ConditionCatalog::new();
        catalog.register("even", |n: &i64| n % 2 == 0);
        catalog.register("positive", |n: &i64| *n > 0);
        catalog
    }

    #[test]
    fn test_evaluate_leaves_and_composites() {
        let catalog = catalog();

        assert!(catalog.evaluate(&even(), &4).unwrap());
        assert!(!catalog.evaluate(&even(), &3).unwrap());

        let both = Predicate::And(Box::new(even()), Box::new(positive()));
        assert!(catalog.evaluate(&both, &4).unwrap());
        assert!(!catalog.evaluate(&both, &-4).unwrap());

        let either = Predicate::Or(Box::new(even()), Box::new(positive()));
        assert!(catalog.evaluate(&either, &3).unwrap());
        assert!(!catalog.evaluate(&either, &-3).unwrap());

        let negated = Predicate::Not(Box::new(even()));
        assert!(catalog.evaluate(&negated, &3).unwrap());
    }

    #[test]
    fn test_unknown_condition_is_an_error() {
        let catalog = catalog();
        let err = catalog
            .evaluate(&Predicate::Leaf("prime"), &7)
            .unwrap_err();
        assert!(matches!(err, PredicateError::UnknownCondition("prime")));
    }

    #[test]
    fn test_serializes_for_query_collaborators() {
        let predicate = Predicate::And(
            Box::new(even()),
            Box::new(Predicate::Not(Box::new(positive()))),
        );

        let json = serde_json::to_value(&predicate).unwrap();
        assert_eq!(json["and"][0]["leaf"], "even");
        assert_eq!(json["and"][1]["not"]["leaf"], "positive");
    }
}
