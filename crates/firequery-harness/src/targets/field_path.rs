//! Field path entry point.

use firequery::{CollectionReference, Direction, FieldPath, Operator, Value};

use super::{CONTINUE, SCRATCH_COLLECTION};
use crate::target::FuzzTarget;

pub fn dictionary_location(resource_root: &str) -> String {
    FuzzTarget::FieldPath.dictionary_location(resource_root)
}

pub fn corpus_location(resource_root: &str) -> String {
    FuzzTarget::FieldPath.corpus_location(resource_root)
}

/// Parse `data` as a field path in every format the library accepts.
pub fn fuzz_test_field_path(data: &[u8]) -> i32 {
    let _ = run_field_path(data);
    CONTINUE
}

/// Outcome of each parse of one input.
#[derive(Debug)]
pub struct FieldPathRun {
    pub dot_separated: firequery::Result<()>,
    pub server_format: firequery::Result<()>,
    /// The input split on NUL into segments.
    pub segments: firequery::Result<()>,
}

/// The work behind the entry point, with each step's result kept.
pub fn run_field_path(data: &[u8]) -> FieldPathRun {
    let input = String::from_utf8_lossy(data);
    FieldPathRun {
        dot_separated: FieldPath::from_dot_separated(&input).and_then(|path| exercise(&path)),
        server_format: FieldPath::from_server_format(&input).and_then(|path| exercise(&path)),
        segments: FieldPath::from_segments(input.split('\0')).and_then(|path| exercise(&path)),
    }
}

fn exercise(path: &FieldPath) -> firequery::Result<()> {
    let canonical = path.canonical_string();
    let reparsed = FieldPath::from_server_format(&canonical);
    assert_eq!(
        reparsed.as_ref(),
        Ok(path),
        "canonical form {:?} does not parse back to {:?}",
        canonical,
        path
    );

    assert!(path.is_prefix_of(path));
    if let Some(rest) = path.pop_first() {
        assert_eq!(rest.len() + 1, path.len());
        assert!(!path.is_prefix_of(&rest));
    }

    let _ = CollectionReference::new(SCRATCH_COLLECTION)?
        .query()
        .where_field(path.clone(), Operator::Equal, Value::Null)?
        .order_by(path.clone(), Direction::Descending)?
        .canonical_id();

    Ok(())
}
