//! Filter operators, field filters, orderings and cursor bounds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{FieldPath, Value};

/// Comparison operator of a field filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    GreaterThanOrEqual,
    GreaterThan,
    ArrayContains,
    ArrayContainsAny,
    In,
    NotIn,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::Equal,
        Operator::NotEqual,
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::ArrayContains,
        Operator::ArrayContainsAny,
        Operator::In,
        Operator::NotIn,
    ];

    /// The textual form used in descriptors and canonical IDs.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::ArrayContains => "array-contains",
            Operator::ArrayContainsAny => "array-contains-any",
            Operator::In => "in",
            Operator::NotIn => "not-in",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.symbol() == symbol)
    }

    /// Operators that restrict a field to a range, which Firestore can only
    /// serve for a single field per query.
    pub fn is_inequality(&self) -> bool {
        matches!(
            self,
            Operator::LessThan
                | Operator::LessThanOrEqual
                | Operator::NotEqual
                | Operator::GreaterThanOrEqual
                | Operator::GreaterThan
                | Operator::NotIn
        )
    }

    /// Operators whose value must be a non-empty array.
    pub fn is_list_operator(&self) -> bool {
        matches!(
            self,
            Operator::ArrayContainsAny | Operator::In | Operator::NotIn
        )
    }

    pub fn is_array_operator(&self) -> bool {
        matches!(self, Operator::ArrayContains | Operator::ArrayContainsAny)
    }

    /// Operators that may not appear in the same query as `self`.
    pub fn conflicting_operators(&self) -> &'static [Operator] {
        match self {
            Operator::NotEqual => &[Operator::NotIn],
            Operator::ArrayContains => &[
                Operator::ArrayContains,
                Operator::ArrayContainsAny,
                Operator::NotIn,
            ],
            Operator::In => &[Operator::ArrayContainsAny, Operator::In, Operator::NotIn],
            Operator::ArrayContainsAny => &[
                Operator::ArrayContains,
                Operator::ArrayContainsAny,
                Operator::In,
                Operator::NotIn,
            ],
            Operator::NotIn => &[
                Operator::ArrayContains,
                Operator::ArrayContainsAny,
                Operator::In,
                Operator::NotIn,
                Operator::NotEqual,
            ],
            _ => &[],
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A single `field op value` restriction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: FieldPath,
    pub op: Operator,
    pub value: Value,
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.value)
    }
}

/// Sort direction of an ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn keyword(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// An ordering on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: FieldPath,
    pub direction: Direction,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction.keyword())
    }
}

/// A cursor position: one value per ordering, starting with the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub position: Vec<Value>,
    /// Whether documents exactly at the position are part of the result.
    pub inclusive: bool,
}
