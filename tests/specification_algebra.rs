//! Algebraic properties of specifications: truth tables, De Morgan
//! equivalences, and agreement between in-memory evaluation and the
//! translated predicate form.

use rand::Rng;

use switchyard::{ConditionCatalog, Specification, SpecificationExt};

struct Reading {
    field: i32,
}

#[derive(Debug, Clone, Copy)]
struct FieldIsOne;

impl Specification<Reading> for FieldIsOne {
    fn is_satisfied_by(&self, candidate: &Reading) -> bool {
        candidate.field == 1
    }

    fn to_predicate(&self) -> switchyard::Predicate {
        switchyard::Predicate::Leaf("reading.field_is_one")
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldIsTwo;

impl Specification<Reading> for FieldIsTwo {
    fn is_satisfied_by(&self, candidate: &Reading) -> bool {
        candidate.field == 2
    }

    fn to_predicate(&self) -> switchyard::Predicate {
        switchyard::Predicate::Leaf("reading.field_is_two")
    }
}

fn catalog() -> ConditionCatalog<Reading> {
    let mut catalog = ConditionCatalog::new();
    catalog.register("reading.field_is_one", |r: &Reading| r.field == 1);
    catalog.register("reading.field_is_two", |r: &Reading| r.field == 2);
    catalog
}

fn sample_readings(count: usize) -> Vec<Reading> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| Reading {
            field: rng.random_range(-2..5),
        })
        .collect()
}

#[test]
fn test_truth_table_for_field_one() {
    let v = Reading { field: 1 };

    assert!(!FieldIsOne.and(FieldIsTwo).is_satisfied_by(&v));
    assert!(FieldIsOne.or(FieldIsTwo).is_satisfied_by(&v));
    assert!(!FieldIsOne.not().is_satisfied_by(&v));
}

#[test]
fn test_de_morgan_over_sampled_domain() {
    let lhs = FieldIsOne.and(FieldIsTwo).not();
    let rhs = FieldIsOne.not().or(FieldIsTwo.not());

    for reading in sample_readings(200) {
        assert_eq!(
            lhs.is_satisfied_by(&reading),
            rhs.is_satisfied_by(&reading),
            "De Morgan mismatch at field={}",
            reading.field
        );
    }
}

#[test]
fn test_de_morgan_holds_in_translated_form_too() {
    let catalog = catalog();
    let lhs = FieldIsOne.and(FieldIsTwo).not().to_predicate();
    let rhs = FieldIsOne.not().or(FieldIsTwo.not()).to_predicate();

    for reading in sample_readings(200) {
        assert_eq!(
            catalog.evaluate(&lhs, &reading).unwrap(),
            catalog.evaluate(&rhs, &reading).unwrap(),
        );
    }
}

#[test]
fn test_surfaces_agree_across_combinations() {
    let catalog = catalog();

    let combinations: Vec<Box<dyn Specification<Reading>>> = vec![
        Box::new(FieldIsOne),
        Box::new(FieldIsTwo),
        Box::new(FieldIsOne.and(FieldIsTwo)),
        Box::new(FieldIsOne.or(FieldIsTwo)),
        Box::new(FieldIsOne.not()),
        Box::new(FieldIsOne.and(FieldIsTwo.not())),
        Box::new(FieldIsOne.not().or(FieldIsTwo).and(FieldIsOne)),
        Box::new(FieldIsOne.and(FieldIsTwo).not()),
    ];

    for spec in &combinations {
        let predicate = spec.to_predicate();
        for reading in sample_readings(100) {
            assert_eq!(
                spec.is_satisfied_by(&reading),
                catalog.evaluate(&predicate, &reading).unwrap(),
                "surfaces disagree for {predicate:?} at field={}",
                reading.field
            );
        }
    }
}

#[test]
fn test_associativity_of_nested_composites() {
    let left_assoc = FieldIsOne.and(FieldIsTwo).and(FieldIsOne.not());
    let right_assoc = FieldIsOne.and(FieldIsTwo.and(FieldIsOne.not()));

    for reading in sample_readings(100) {
        assert_eq!(
            left_assoc.is_satisfied_by(&reading),
            right_assoc.is_satisfied_by(&reading),
        );
    }
}
