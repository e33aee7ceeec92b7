//! Query construction and validation.

use serde::{Deserialize, Serialize};

use super::filter::{Bound, Direction, FieldFilter, Operator, OrderBy};
use crate::error::{Error, Result};
use crate::model::{FieldPath, ResourcePath, Value};

/// Maximum number of values accepted by `in`, `not-in` and
/// `array-contains-any` filters.
pub const MAX_LIST_VALUES: usize = 10;

/// Whether a limit applies to the first or last matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LimitType {
    First,
    Last,
}

/// An immutable query over a single collection.
///
/// Every builder method consumes the query and returns a new one, or an
/// [`Error::InvalidQuery`] if the added constraint cannot be served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    path: ResourcePath,
    filters: Vec<FieldFilter>,
    explicit_order_by: Vec<OrderBy>,
    limit: Option<(i64, LimitType)>,
    start_at: Option<Bound>,
    end_at: Option<Bound>,
}

impl Query {
    /// An unfiltered query over the collection at `path`.
    pub fn new(path: ResourcePath) -> Self {
        Self {
            path,
            filters: Vec::new(),
            explicit_order_by: Vec::new(),
            limit: None,
            start_at: None,
            end_at: None,
        }
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    pub fn filters(&self) -> &[FieldFilter] {
        &self.filters
    }

    pub fn explicit_order_by(&self) -> &[OrderBy] {
        &self.explicit_order_by
    }

    pub fn limit_value(&self) -> Option<i64> {
        self.limit.map(|(n, _)| n)
    }

    pub fn limit_type(&self) -> Option<LimitType> {
        self.limit.map(|(_, t)| t)
    }

    pub fn start_bound(&self) -> Option<&Bound> {
        self.start_at.as_ref()
    }

    pub fn end_bound(&self) -> Option<&Bound> {
        self.end_at.as_ref()
    }

    /// The field restricted by an inequality filter, if any.
    pub fn inequality_field(&self) -> Option<&FieldPath> {
        self.filters
            .iter()
            .find(|filter| filter.op.is_inequality())
            .map(|filter| &filter.field)
    }

    pub fn first_order_by_field(&self) -> Option<&FieldPath> {
        self.explicit_order_by.first().map(|order| &order.field)
    }

    /// Add a filter given a user-format field path.
    pub fn where_path(self, field: &str, op: Operator, value: impl Into<Value>) -> Result<Self> {
        let field = FieldPath::from_dot_separated(field)?;
        self.where_field(field, op, value)
    }

    /// Add a filter.
    pub fn where_field(mut self, field: FieldPath, op: Operator, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();

        let value = if field.is_key_field_path() {
            self.validate_document_id_filter(op, value)?
        } else {
            validate_value_for_operator(op, &value)?;
            value
        };

        self.validate_new_filter(&field, op)?;

        self.filters.push(FieldFilter { field, op, value });
        Ok(self)
    }

    /// Add an ordering.
    pub fn order_by(mut self, field: FieldPath, direction: Direction) -> Result<Self> {
        if self.start_at.is_some() {
            return Err(Error::query(
                "You must not specify a starting point before specifying the order by.",
            ));
        }
        if self.end_at.is_some() {
            return Err(Error::query(
                "You must not specify an ending point before specifying the order by.",
            ));
        }
        if self.explicit_order_by.is_empty() {
            if let Some(inequality) = self.inequality_field() {
                validate_order_by_and_inequality_match(inequality, &field)?;
            }
        }

        self.explicit_order_by.push(OrderBy { field, direction });
        Ok(self)
    }

    /// Limit the result to the first `n` documents.
    pub fn limit(mut self, n: i64) -> Result<Self> {
        validate_limit(n)?;
        self.limit = Some((n, LimitType::First));
        Ok(self)
    }

    /// Limit the result to the last `n` documents.
    pub fn limit_to_last(mut self, n: i64) -> Result<Self> {
        validate_limit(n)?;
        self.limit = Some((n, LimitType::Last));
        Ok(self)
    }

    pub fn start_at(mut self, values: Vec<Value>) -> Result<Self> {
        self.start_at = Some(self.bound_from_values("start_at", values, true)?);
        Ok(self)
    }

    pub fn start_after(mut self, values: Vec<Value>) -> Result<Self> {
        self.start_at = Some(self.bound_from_values("start_after", values, false)?);
        Ok(self)
    }

    pub fn end_at(mut self, values: Vec<Value>) -> Result<Self> {
        self.end_at = Some(self.bound_from_values("end_at", values, true)?);
        Ok(self)
    }

    pub fn end_before(mut self, values: Vec<Value>) -> Result<Self> {
        self.end_at = Some(self.bound_from_values("end_before", values, false)?);
        Ok(self)
    }

    /// The full ordering the backend applies: the explicit orderings, the
    /// inequality field when nothing was ordered explicitly, and finally
    /// the document ID as a tiebreaker.
    pub fn normalized_order_by(&self) -> Vec<OrderBy> {
        let mut order_by = self.explicit_order_by.clone();

        if order_by.is_empty() {
            if let Some(inequality) = self.inequality_field() {
                if !inequality.is_key_field_path() {
                    order_by.push(OrderBy {
                        field: inequality.clone(),
                        direction: Direction::Ascending,
                    });
                }
            }
        }

        if !order_by.iter().any(|order| order.field.is_key_field_path()) {
            let direction = order_by
                .last()
                .map(|order| order.direction)
                .unwrap_or_default();
            order_by.push(OrderBy {
                field: FieldPath::document_id(),
                direction,
            });
        }

        order_by
    }

    /// Checks that only apply once the query is about to run.
    pub fn validate_for_execution(&self) -> Result<()> {
        if self.limit_type() == Some(LimitType::Last) && self.explicit_order_by.is_empty() {
            return Err(Error::query(
                "limit_to_last queries require specifying at least one order by clause.",
            ));
        }
        Ok(())
    }

    /// A deterministic string identifying the query's semantics.
    pub fn canonical_id(&self) -> String {
        let mut id = self.path.canonical_string();

        id.push_str("|f:");
        for filter in &self.filters {
            id.push_str(&format!("{}{}{}", filter.field, filter.op, filter.value));
        }

        id.push_str("|ob:");
        for order in self.normalized_order_by() {
            id.push_str(&format!("{}{}", order.field, order.direction.keyword()));
        }

        if let Some((n, limit_type)) = self.limit {
            let kind = match limit_type {
                LimitType::First => "f",
                LimitType::Last => "l",
            };
            id.push_str(&format!("|l:{}|lt:{}", n, kind));
        }
        if let Some(bound) = &self.start_at {
            id.push_str(&format!("|lb:{}", canonical_bound(bound)));
        }
        if let Some(bound) = &self.end_at {
            id.push_str(&format!("|ub:{}", canonical_bound(bound)));
        }

        id
    }

    fn validate_new_filter(&self, field: &FieldPath, op: Operator) -> Result<()> {
        if op.is_inequality() {
            if let Some(existing) = self.inequality_field() {
                if existing != field {
                    return Err(Error::query(format!(
                        "All where filters with an inequality (<, <=, >, >=, !=, not-in) must be \
                         on the same field. But you have inequality filters on '{}' and '{}'",
                        existing, field
                    )));
                }
            }
            if let Some(first_order_by) = self.first_order_by_field() {
                validate_order_by_and_inequality_match(field, first_order_by)?;
            }
        }

        let conflicts = op.conflicting_operators();
        if let Some(existing) = self
            .filters
            .iter()
            .map(|filter| filter.op)
            .find(|existing| conflicts.contains(existing))
        {
            return Err(if existing == op {
                Error::query(format!(
                    "You cannot use more than one '{}' filter.",
                    op.symbol()
                ))
            } else {
                Error::query(format!(
                    "You cannot use '{}' filters with '{}' filters.",
                    op.symbol(),
                    existing.symbol()
                ))
            });
        }

        Ok(())
    }

    /// Validate a filter on the document ID and convert plain IDs into
    /// references.
    fn validate_document_id_filter(&self, op: Operator, value: Value) -> Result<Value> {
        if op.is_array_operator() {
            return Err(Error::query(format!(
                "You can't perform '{}' queries on the document ID.",
                op.symbol()
            )));
        }

        if op.is_list_operator() {
            validate_list_value(op, &value)?;
        }

        match value {
            Value::Array(values) if op.is_list_operator() => {
                let references = values
                    .into_iter()
                    .map(|value| self.parse_document_id_value(value))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Value::Array(references))
            }
            value => self.parse_document_id_value(value),
        }
    }

    fn parse_document_id_value(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(id) => {
                if id.is_empty() {
                    return Err(Error::query(
                        "When querying by document ID you must provide a valid document ID, \
                         but it was an empty string.",
                    ));
                }
                if id.contains('/') {
                    return Err(Error::query(format!(
                        "When querying a collection by document ID you must provide a plain \
                         document ID, but '{}' contains a '/' character.",
                        id
                    )));
                }
                Ok(Value::Reference(self.path.child(id)))
            }
            Value::Reference(path) => {
                if path.is_empty() || path.len() % 2 != 0 {
                    return Err(Error::query(format!(
                        "When querying by document ID you must provide a document reference, \
                         but '{}' is not a document path.",
                        path
                    )));
                }
                Ok(Value::Reference(path))
            }
            other => Err(Error::query(format!(
                "When querying by document ID you must provide a valid string or a document \
                 reference, but it was of type: {}",
                other.type_name()
            ))),
        }
    }

    fn bound_from_values(&self, method: &str, values: Vec<Value>, inclusive: bool) -> Result<Bound> {
        if values.is_empty() {
            return Err(Error::query(format!(
                "{}() requires at least one value.",
                method
            )));
        }
        if values.len() > self.explicit_order_by.len() {
            return Err(Error::query(format!(
                "Too many arguments provided to {}(). The number of arguments must be less \
                 than or equal to the number of order by clauses.",
                method
            )));
        }

        let position = values
            .into_iter()
            .zip(self.explicit_order_by.iter())
            .map(|(value, order)| {
                if order.field.is_key_field_path() {
                    self.parse_document_id_value(value)
                } else {
                    Ok(value)
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Bound {
            position,
            inclusive,
        })
    }
}

fn validate_limit(n: i64) -> Result<()> {
    if n <= 0 {
        return Err(Error::query(format!(
            "Query limit ({}) is invalid. Limit must be positive.",
            n
        )));
    }
    Ok(())
}

fn validate_value_for_operator(op: Operator, value: &Value) -> Result<()> {
    if op.is_list_operator() {
        return validate_list_value(op, value);
    }

    if value.is_null() || value.is_nan() {
        if !matches!(op, Operator::Equal | Operator::NotEqual) {
            let kind = if value.is_null() { "Null" } else { "NaN" };
            return Err(Error::query(format!(
                "{} only supports '==' and '!=' comparisons.",
                kind
            )));
        }
    }

    Ok(())
}

fn validate_list_value(op: Operator, value: &Value) -> Result<()> {
    match value.as_array() {
        Some(values) if values.is_empty() => Err(Error::query(format!(
            "A non-empty array is required for '{}' filters.",
            op.symbol()
        ))),
        Some(values) if values.len() > MAX_LIST_VALUES => Err(Error::query(format!(
            "'{}' filters support a maximum of {} elements in the value array.",
            op.symbol(),
            MAX_LIST_VALUES
        ))),
        Some(_) => Ok(()),
        None => Err(Error::query(format!(
            "A non-empty array is required for '{}' filters, but it was of type: {}",
            op.symbol(),
            value.type_name()
        ))),
    }
}

fn validate_order_by_and_inequality_match(inequality: &FieldPath, order_by: &FieldPath) -> Result<()> {
    if inequality != order_by {
        return Err(Error::query(format!(
            "You have a where filter with an inequality on field '{}' and so you must also \
             use '{}' as your first order by field, but your first order by is currently on \
             field '{}' instead.",
            inequality, inequality, order_by
        )));
    }
    Ok(())
}

fn canonical_bound(bound: &Bound) -> String {
    let prefix = if bound.inclusive { "b" } else { "a" };
    let values: Vec<String> = bound.position.iter().map(Value::to_string).collect();
    format!("{}:{}", prefix, values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Query {
        Query::new(ResourcePath::parse("rooms").unwrap())
    }

    fn field(path: &str) -> FieldPath {
        FieldPath::from_dot_separated(path).unwrap()
    }

    #[test]
    fn test_simple_filters_and_ordering() {
        let query = rooms()
            .where_path("owner", Operator::Equal, "alice")
            .unwrap()
            .where_path("size", Operator::GreaterThan, Value::Integer(3))
            .unwrap()
            .order_by(field("size"), Direction::Descending)
            .unwrap()
            .limit(10)
            .unwrap();

        assert_eq!(query.filters().len(), 2);
        assert_eq!(query.inequality_field(), Some(&field("size")));
        assert_eq!(query.limit_value(), Some(10));
        assert_eq!(query.limit_type(), Some(LimitType::First));
    }

    #[test]
    fn test_inequalities_must_share_a_field() {
        let err = rooms()
            .where_path("a", Operator::LessThan, Value::Integer(1))
            .unwrap()
            .where_path("b", Operator::GreaterThan, Value::Integer(1))
            .unwrap_err();
        assert!(err.to_string().contains("same field"));

        // A second inequality on the same field is fine.
        assert!(rooms()
            .where_path("a", Operator::LessThan, Value::Integer(1))
            .unwrap()
            .where_path("a", Operator::GreaterThan, Value::Integer(0))
            .is_ok());
    }

    #[test]
    fn test_first_order_by_must_match_inequality() {
        let err = rooms()
            .where_path("a", Operator::LessThan, Value::Integer(1))
            .unwrap()
            .order_by(field("b"), Direction::Ascending)
            .unwrap_err();
        assert!(err.to_string().contains("first order by"));

        let err = rooms()
            .order_by(field("b"), Direction::Ascending)
            .unwrap()
            .where_path("a", Operator::NotEqual, Value::Integer(1))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)));

        // Only the first ordering is constrained.
        assert!(rooms()
            .where_path("a", Operator::LessThan, Value::Integer(1))
            .unwrap()
            .order_by(field("a"), Direction::Ascending)
            .unwrap()
            .order_by(field("b"), Direction::Ascending)
            .is_ok());
    }

    #[test]
    fn test_conflicting_operators() {
        let err = rooms()
            .where_path("tags", Operator::ArrayContains, "x")
            .unwrap()
            .where_path("tags", Operator::ArrayContains, "y")
            .unwrap_err();
        assert!(err.to_string().contains("more than one 'array-contains'"));

        let list = || Value::Array(vec![Value::from("x")]);
        let err = rooms()
            .where_path("a", Operator::In, list())
            .unwrap()
            .where_path("b", Operator::ArrayContainsAny, list())
            .unwrap_err();
        assert!(err.to_string().contains("'array-contains-any' filters with 'in'"));

        assert!(rooms()
            .where_path("a", Operator::NotEqual, Value::Integer(1))
            .unwrap()
            .where_path("a", Operator::NotIn, list())
            .is_err());
    }

    #[test]
    fn test_list_operator_values() {
        assert!(rooms().where_path("a", Operator::In, Value::Array(vec![])).is_err());
        assert!(rooms().where_path("a", Operator::In, Value::Integer(1)).is_err());

        let too_many = Value::Array((0..=MAX_LIST_VALUES as i64).map(Value::Integer).collect());
        assert!(rooms().where_path("a", Operator::In, too_many).is_err());

        let max = Value::Array((0..MAX_LIST_VALUES as i64).map(Value::Integer).collect());
        assert!(rooms().where_path("a", Operator::In, max).is_ok());
    }

    #[test]
    fn test_null_and_nan_require_equality() {
        assert!(rooms().where_path("a", Operator::Equal, Value::Null).is_ok());
        assert!(rooms().where_path("a", Operator::NotEqual, f64::NAN).is_ok());
        assert!(rooms().where_path("a", Operator::LessThan, Value::Null).is_err());
        assert!(rooms().where_path("a", Operator::ArrayContains, f64::NAN).is_err());
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

        assert!(rooms()
            .where_field(FieldPath::document_id(), Operator::Equal, "a/b")
            .is_err());
        assert!(rooms()
            .where_field(FieldPath::document_id(), Operator::Equal, "")
            .is_err());
        assert!(rooms()
            .where_field(FieldPath::document_id(), Operator::Equal, Value::Integer(7))
            .is_err());
        assert!(rooms()
            .where_field(FieldPath::document_id(), Operator::ArrayContains, "x")
            .is_err());

        let ids = Value::Array(vec![Value::from("a"), Value::from("b")]);
        let query = rooms()
            .where_field(FieldPath::document_id(), Operator::In, ids)
            .unwrap();
        assert_eq!(query.filters()[0].value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_limits_must_be_positive() {
        assert!(rooms().limit(0).is_err());
        assert!(rooms().limit(-5).is_err());
        assert!(rooms().limit_to_last(i64::MIN).is_err());
        assert!(rooms().limit_to_last(1).is_ok());
    }

    #[test]
    fn test_limit_to_last_needs_order_by_at_execution() {
        let query = rooms().limit_to_last(3).unwrap();
        assert!(query.validate_for_execution().is_err());

        let query = query.order_by(field("a"), Direction::Ascending).unwrap();
        assert!(query.validate_for_execution().is_ok());
    }

    #[test]
    fn test_cursors() {
        let ordered = rooms()
            .order_by(field("a"), Direction::Ascending)
            .unwrap();

        assert!(ordered.clone().start_at(vec![Value::Integer(1)]).is_ok());
        assert!(ordered.clone().end_before(vec![]).is_err());
        assert!(ordered
            .clone()
            .start_after(vec![Value::Integer(1), Value::Integer(2)])
            .is_err());

        let err = ordered
            .start_at(vec![Value::Integer(1)])
            .unwrap()
            .order_by(field("b"), Direction::Ascending)
            .unwrap_err();
        assert!(err.to_string().contains("starting point"));
    }

    #[test]
    fn test_document_id_cursor_values() {
        let by_id = rooms()
            .order_by(FieldPath::document_id(), Direction::Ascending)
            .unwrap();
        let query = by_id.clone().start_at(vec![Value::from("eros")]).unwrap();
        assert!(matches!(
            query.start_bound().unwrap().position[0],
            Value::Reference(_)
        ));
        assert!(by_id.start_at(vec![Value::from("a/b")]).is_err());
    }

    #[test]
    fn test_normalized_order_by() {
        let query = rooms();
        let order = query.normalized_order_by();
        assert_eq!(order.len(), 1);
        assert!(order[0].field.is_key_field_path());

        let query = rooms().where_path("a", Operator::GreaterThan, Value::Integer(1)).unwrap();
        let order = query.normalized_order_by();
        assert_eq!(order[0].field, field("a"));
        assert!(order[1].field.is_key_field_path());

        let query = rooms()
            .order_by(field("b"), Direction::Descending)
            .unwrap();
        let order = query.normalized_order_by();
        assert_eq!(order[1].direction, Direction::Descending);
    }

    #[test]
    fn test_canonical_id() {
        let query = rooms()
            .where_path("a", Operator::GreaterThan, Value::Integer(1))
            .unwrap()
            .limit(2)
            .unwrap();
        assert_eq!(query.canonical_id(), "rooms|f:a>1|ob:aasc__name__asc|l:2|lt:f");
        assert_eq!(query.canonical_id(), query.clone().canonical_id());
    }
}
