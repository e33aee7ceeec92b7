//! Query entry point.
//!
//! Each input is used twice: decoded as a [`QueryDescriptor`], and taken
//! as-is as the collection path, field name and value of a small query the
//! way a careless caller might pass untrusted text straight through.

use firequery::{CollectionReference, Direction, FieldPath, Operator, Query, QueryDescriptor, Value};

use super::{CONTINUE, SCRATCH_COLLECTION};
use crate::target::FuzzTarget;

pub fn dictionary_location(resource_root: &str) -> String {
    FuzzTarget::Query.dictionary_location(resource_root)
}

pub fn corpus_location(resource_root: &str) -> String {
    FuzzTarget::Query.corpus_location(resource_root)
}

/// Decode `data` into a query and run every validation step on it.
pub fn fuzz_test_query(data: &[u8]) -> i32 {
    let _ = run_query(data);
    CONTINUE
}

/// Outcome of both passes over one input.
#[derive(Debug)]
pub struct QueryRun {
    /// The input decoded as a descriptor, built and validated.
    pub descriptor: firequery::Result<()>,
    /// The input used verbatim as collection, field and value.
    pub raw: firequery::Result<()>,
}

/// The work behind the entry point, with each step's result kept.
pub fn run_query(data: &[u8]) -> QueryRun {
    let input = String::from_utf8_lossy(data);
    QueryRun {
        descriptor: QueryDescriptor::parse(&input)
            .and_then(|descriptor| exercise_descriptor(&descriptor)),
        raw: exercise_raw(&input),
    }
}

fn exercise_descriptor(descriptor: &QueryDescriptor) -> firequery::Result<()> {
    let query = descriptor.build()?;
    check_invariants(&query);
    query.validate_for_execution()
}

fn exercise_raw(input: &str) -> firequery::Result<()> {
    let collection = CollectionReference::new(input)
        .or_else(|_| CollectionReference::new(SCRATCH_COLLECTION))?;
    let field = FieldPath::from_dot_separated(input)
        .or_else(|_| FieldPath::from_server_format(input))?;

    let query = collection
        .query()
        .where_field(field.clone(), Operator::Equal, input)?
        .order_by(field, Direction::Ascending)?
        .start_at(vec![Value::from(input)])?;
    check_invariants(&query);

    let limit = i64::try_from(input.len()).unwrap_or(i64::MAX);
    let query = query.limit_to_last(limit)?;
    check_invariants(&query);
    query.validate_for_execution()
}

fn check_invariants(query: &Query) {
    let order_by = query.normalized_order_by();
    assert!(
        order_by.iter().any(|order| order.field.is_key_field_path()),
        "normalized ordering of {} has no document ID tiebreaker",
        query.canonical_id()
    );
    assert!(order_by.len() >= query.explicit_order_by().len());

    if let (Some(inequality), Some(first)) = (query.inequality_field(), order_by.first()) {
        assert_eq!(
            &first.field,
            inequality,
            "first ordering of {} is not on the inequality field",
            query.canonical_id()
        );
    }

    assert_eq!(query.canonical_id(), query.clone().canonical_id());
}
