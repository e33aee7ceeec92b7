//! Structured fuzzer for query construction.
//!
//! Generates descriptors from the grammar's own clauses so most iterations
//! get past the tokenizer and into query validation and normalization.
//! Field names and string values still come from the fuzzer unchanged.
//!
//! ```bash
//! cargo fuzz run fuzz_query_structured -- \
//!     -dict=resources/FIRQuery/firquery.dictionary -runs=1000000
//! ```

#![no_main]

use arbitrary::Arbitrary;
use firequery_harness::targets::query::fuzz_test_query;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzOperator {
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

impl FuzzOperator {
    fn symbol(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::GreaterThanOrEqual => ">=",
            Self::GreaterThan => ">",
            Self::ArrayContains => "array-contains",
            Self::ArrayContainsAny => "array-contains-any",
            Self::In => "in",
            Self::NotIn => "not-in",
        }
    }
}

#[derive(Arbitrary, Debug, Clone)]
enum FuzzValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Reference(String),
    Array(Vec<FuzzScalar>),
}

/// Array elements stay flat; nesting is covered by the byte-level target.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzScalar {
    Null,
    Integer(i64),
    String(String),
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl FuzzScalar {
    fn to_descriptor(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Integer(i) => i.to_string(),
            Self::String(s) => quote(s),
        }
    }
}

impl FuzzValue {
    fn to_descriptor(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(i) => i.to_string(),
            Self::Double(d) if d.is_nan() => "NaN".to_string(),
            Self::Double(d) => format!("{:?}", d),
            Self::String(s) => quote(s),
            Self::Reference(path) => format!("ref({})", path),
            Self::Array(items) => {
                let items: Vec<String> = items.iter().map(FuzzScalar::to_descriptor).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

/// Either a plain field or the document key.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzField {
    Named(String),
    DocumentId,
}

impl FuzzField {
    fn to_descriptor(&self) -> String {
        match self {
            Self::Named(name) if name.is_empty() => "f".to_string(),
            Self::Named(name) => format!("`{}`", name.replace('\\', "\\\\").replace('`', "\\`")),
            Self::DocumentId => "__name__".to_string(),
        }
    }
}

#[derive(Arbitrary, Debug, Clone)]
enum FuzzClause {
    Where(FuzzField, FuzzOperator, FuzzValue),
    OrderBy(FuzzField, Option<bool>),
    Limit(i64),
    LimitToLast(i64),
    StartAt(Vec<FuzzValue>),
    StartAfter(Vec<FuzzValue>),
    EndAt(Vec<FuzzValue>),
    EndBefore(Vec<FuzzValue>),
}

fn cursor(keyword: &str, values: &[FuzzValue]) -> String {
    let values: Vec<String> = values.iter().map(FuzzValue::to_descriptor).collect();
    format!("{} [{}]", keyword, values.join(", "))
}

impl FuzzClause {
    fn to_descriptor(&self) -> String {
        match self {
            Self::Where(field, op, value) => format!(
                "where {} {} {}",
                field.to_descriptor(),
                op.symbol(),
                value.to_descriptor()
            ),
            Self::OrderBy(field, direction) => {
                let direction = match direction {
                    Some(true) => " asc",
                    Some(false) => " desc",
                    None => "",
                };
                format!("order by {}{}", field.to_descriptor(), direction)
            }
            Self::Limit(n) => format!("limit {}", n),
            Self::LimitToLast(n) => format!("limit_to_last {}", n),
            Self::StartAt(values) => cursor("start_at", values),
            Self::StartAfter(values) => cursor("start_after", values),
            Self::EndAt(values) => cursor("end_at", values),
            Self::EndBefore(values) => cursor("end_before", values),
        }
    }
}

#[derive(Arbitrary, Debug)]
struct FuzzQuery {
    collection: Vec<String>,
    clauses: Vec<FuzzClause>,
}

impl FuzzQuery {
    fn to_descriptor(&self) -> String {
        let segments: Vec<&str> = self
            .collection
            .iter()
            .map(String::as_str)
            .filter(|segment| !segment.is_empty())
            .collect();
        let mut descriptor = if segments.is_empty() {
            "rooms".to_string()
        } else {
            segments.join("/")
        };
        for clause in &self.clauses {
            descriptor.push(' ');
            descriptor.push_str(&clause.to_descriptor());
        }
        descriptor
    }
}

fuzz_target!(|fuzz_query: FuzzQuery| {
    let descriptor = fuzz_query.to_descriptor();
    fuzz_test_query(descriptor.as_bytes());
});
