//! Integration tests for query construction rules.
//!
//! Each scenario is built twice where possible: once through the builder
//! API and once from a textual descriptor, and the two must agree.

use firequery::{
    CollectionReference, Direction, DocumentReference, Error, FieldPath, LimitType, Operator,
    Query, QueryDescriptor, ResourcePath, Value,
};

fn rooms() -> Query {
    CollectionReference::new("rooms").unwrap().query()
}

fn field(path: &str) -> FieldPath {
    FieldPath::from_dot_separated(path).unwrap()
}

fn assert_invalid_query<T: std::fmt::Debug>(result: firequery::Result<T>) {
    assert!(
        matches!(result, Err(Error::InvalidQuery(_))),
        "expected an invalid query, got {:?}",
        result
    );
}

// =============================================================================
// References
// =============================================================================

#[test]
fn test_reference_shapes() {
    let messages = CollectionReference::new("rooms/eros/messages").unwrap();
    assert_eq!(messages.id(), "messages");
    assert_eq!(messages.parent().unwrap().id(), "eros");

    let message = messages.document("m1").unwrap();
    assert_eq!(message.path().canonical_string(), "rooms/eros/messages/m1");
    assert_eq!(message.parent(), messages);

    assert!(matches!(
        CollectionReference::new("rooms/eros"),
        Err(Error::InvalidCollectionReference { segments: 2, .. })
    ));
    assert!(matches!(
        DocumentReference::new("rooms"),
        Err(Error::InvalidDocumentReference { segments: 1, .. })
    ));
    assert!(matches!(
        CollectionReference::new("rooms//eros/messages"),
        Err(Error::InvalidPath(_))
    ));
}

// =============================================================================
// Filters
// =============================================================================

#[test]
fn test_inequalities_must_share_a_field() {
    let query = rooms()
        .where_path("likes", Operator::GreaterThan, Value::Integer(1))
        .unwrap()
        .where_path("likes", Operator::LessThan, Value::Integer(10))
        .unwrap();
    assert_eq!(query.inequality_field(), Some(&field("likes")));

    assert_invalid_query(query.where_path("age", Operator::NotEqual, Value::Integer(3)));
}

#[test]
fn test_first_order_by_must_match_inequality() {
    let filtered = rooms()
        .where_path("likes", Operator::GreaterThanOrEqual, Value::Integer(1))
        .unwrap();
    assert_invalid_query(filtered.clone().order_by(field("author"), Direction::Ascending));
    assert!(filtered.order_by(field("likes"), Direction::Descending).is_ok());

    let ordered = rooms().order_by(field("author"), Direction::Ascending).unwrap();
    assert_invalid_query(ordered.where_path("likes", Operator::LessThan, Value::Integer(4)));
}

#[test]
fn test_null_and_nan_only_support_equality() {
    for value in [Value::Null, Value::Double(f64::NAN)] {
        assert!(rooms().where_path("a", Operator::Equal, value.clone()).is_ok());
        assert!(rooms().where_path("a", Operator::NotEqual, value.clone()).is_ok());
        assert_invalid_query(rooms().where_path("a", Operator::GreaterThan, value.clone()));
        assert_invalid_query(rooms().where_path("a", Operator::ArrayContains, value));
    }
}

#[test]
fn test_list_operators_require_small_non_empty_arrays() {
    let ten: Vec<Value> = (0..10).map(Value::Integer).collect();
    let eleven: Vec<Value> = (0..11).map(Value::Integer).collect();

    assert!(rooms().where_path("a", Operator::In, ten).is_ok());
    assert_invalid_query(rooms().where_path("a", Operator::In, eleven));
    assert_invalid_query(rooms().where_path("a", Operator::NotIn, Value::Array(vec![])));
    assert_invalid_query(rooms().where_path("a", Operator::ArrayContainsAny, "x"));
}

#[test]
fn test_conflicting_operators() {
    let with_in = rooms()
        .where_path("a", Operator::In, vec![Value::Integer(1)])
        .unwrap();
    assert_invalid_query(with_in.clone().where_path("b", Operator::In, vec![Value::Integer(2)]));
    assert_invalid_query(with_in.where_path("b", Operator::NotIn, vec![Value::Integer(2)]));

    let with_contains = rooms()
        .where_path("tags", Operator::ArrayContains, "red")
        .unwrap();
    assert_invalid_query(with_contains.where_path("tags", Operator::ArrayContains, "blue"));
}

#[test]
fn test_document_id_filters() {
    let query = rooms()
        .where_field(FieldPath::document_id(), Operator::Equal, "eros")
        .unwrap();
    assert_eq!(
        query.filters()[0].value,
        Value::Reference(ResourcePath::parse("rooms/eros").unwrap())
    );

    let query = rooms()
        .where_field(
            FieldPath::document_id(),
            Operator::In,
            vec![Value::from("eros"), Value::from("psyche")],
        )
        .unwrap();
    assert_eq!(query.filters()[0].value.as_array().unwrap().len(), 2);

    assert_invalid_query(rooms().where_field(FieldPath::document_id(), Operator::Equal, ""));
    assert_invalid_query(rooms().where_field(FieldPath::document_id(), Operator::Equal, "a/b"));
    assert_invalid_query(rooms().where_field(
        FieldPath::document_id(),
        Operator::ArrayContains,
        "eros",
    ));
    assert_invalid_query(rooms().where_field(
        FieldPath::document_id(),
        Operator::Equal,
        Value::Integer(7),
    ));
}

// =============================================================================
// Ordering, Limits and Cursors
// =============================================================================

#[test]
fn test_normalized_order_by() {
    let query = rooms()
        .where_path("likes", Operator::GreaterThan, Value::Integer(1))
        .unwrap();
    let order_by = query.normalized_order_by();
    assert_eq!(order_by.len(), 2);
    assert_eq!(order_by[0].field, field("likes"));
    assert!(order_by[1].field.is_key_field_path());

    let query = rooms().order_by(field("a"), Direction::Descending).unwrap();
    let order_by = query.normalized_order_by();
    assert_eq!(order_by[1].direction, Direction::Descending);

    let order_by = rooms().normalized_order_by();
    assert_eq!(order_by.len(), 1);
    assert!(order_by[0].field.is_key_field_path());
}

#[test]
fn test_limits() {
    assert_invalid_query(rooms().limit(0));
    assert_invalid_query(rooms().limit_to_last(-3));

    let query = rooms().limit_to_last(5).unwrap();
    assert_eq!(query.limit_type(), Some(LimitType::Last));
    assert_invalid_query(query.validate_for_execution());

    let query = rooms()
        .order_by(field("a"), Direction::Ascending)
        .unwrap()
        .limit_to_last(5)
        .unwrap();
    assert!(query.validate_for_execution().is_ok());
}

#[test]
fn test_cursor_rules() {
    assert_invalid_query(rooms().start_at(vec![Value::Integer(1)]));

    let ordered = rooms().order_by(field("a"), Direction::Ascending).unwrap();
    assert_invalid_query(ordered.clone().start_at(vec![]));
    assert_invalid_query(
        ordered
            .clone()
            .end_at(vec![Value::Integer(1), Value::Integer(2)]),
    );

    let bounded = ordered.start_after(vec![Value::Integer(1)]).unwrap();
    assert!(!bounded.start_bound().unwrap().inclusive);
    assert_invalid_query(bounded.order_by(field("b"), Direction::Ascending));

    let by_id = rooms()
        .order_by(FieldPath::document_id(), Direction::Ascending)
        .unwrap()
        .end_before(vec![Value::from("eros")])
        .unwrap();
    assert_eq!(
        by_id.end_bound().unwrap().position[0],
        Value::Reference(ResourcePath::parse("rooms/eros").unwrap())
    );
}

// =============================================================================
// Descriptors
// =============================================================================

#[test]
fn test_descriptor_matches_builder() {
    let built = CollectionReference::new("rooms/eros/messages")
        .unwrap()
        .query()
        .where_path("author", Operator::Equal, "alice")
        .unwrap()
        .where_path("likes", Operator::GreaterThan, Value::Integer(10))
        .unwrap()
        .order_by(field("likes"), Direction::Descending)
        .unwrap()
        .limit(20)
        .unwrap();

    let parsed = QueryDescriptor::parse(
        r#"rooms/eros/messages where author == "alice" where likes > 10 order by likes desc limit 20"#,
    )
    .unwrap()
    .build()
    .unwrap();

    assert_eq!(parsed, built);
    assert_eq!(parsed.canonical_id(), built.canonical_id());
}

#[test]
fn test_canonical_id_distinguishes_queries() {
    let a = rooms().limit(1).unwrap();
    let b = rooms().limit_to_last(1).unwrap();
    let c = rooms()
        .where_path("x", Operator::Equal, Value::Integer(1))
        .unwrap();
    assert_ne!(a.canonical_id(), b.canonical_id());
    assert_ne!(a.canonical_id(), c.canonical_id());
    assert!(c.canonical_id().starts_with("rooms|f:"));
}

#[test]
fn test_descriptor_errors_are_values() {
    let inputs = [
        "rooms where",
        "rooms where a ** 1",
        r#"rooms where a == "open"#,
        "rooms order a",
        "rooms limit many",
        "rooms where a in [1, 2",
    ];
    for input in inputs {
        assert!(
            matches!(QueryDescriptor::parse(input), Err(Error::Descriptor { .. })),
            "{} should fail to parse",
            input
        );
    }

    let descriptor = QueryDescriptor::parse("rooms where a > 1 order by b").unwrap();
    assert_invalid_query(descriptor.build());
}
