//! firequery: client-side paths, references and query construction for a
//! Firestore-style document database.
//!
//! The library validates everything a client can check before a query ever
//! reaches a server: field path syntax, collection and document path shape,
//! and the rules that make a combination of filters, orderings, limits and
//! cursors servable.
//!
//! # Example
//!
//! ```
//! use firequery::{CollectionReference, Direction, FieldPath, Operator, Value};
//!
//! let messages = CollectionReference::new("rooms/eros/messages").unwrap();
//! let query = messages
//!     .query()
//!     .where_path("likes", Operator::GreaterThan, Value::Integer(10))
//!     .unwrap()
//!     .order_by(FieldPath::from_dot_separated("likes").unwrap(), Direction::Descending)
//!     .unwrap()
//!     .limit(20)
//!     .unwrap();
//!
//! println!("{}", query.canonical_id());
//! ```

pub mod error;
pub mod model;
pub mod query;

pub use error::{Error, Result};
pub use model::{
    CollectionReference, DocumentReference, FieldPath, ResourcePath, Value, DOCUMENT_KEY_NAME,
};
pub use query::{
    Bound, Clause, Direction, FieldFilter, LimitType, Operator, OrderBy, Query, QueryDescriptor,
    MAX_LIST_VALUES,
};
