//! Query construction, validation and textual descriptors.

mod descriptor;
mod filter;
#[allow(clippy::module_inception)]
mod query;

pub use descriptor::{Clause, QueryDescriptor};
pub use filter::{Bound, Direction, FieldFilter, Operator, OrderBy};
pub use query::{LimitType, Query, MAX_LIST_VALUES};
