//! Collection reference entry point.
//!
//! Shares its dictionary and corpus with the field path target.

use firequery::{CollectionReference, DocumentReference, FieldPath, Operator};

use super::CONTINUE;
use crate::target::FuzzTarget;

pub fn dictionary_location(resource_root: &str) -> String {
    FuzzTarget::CollectionReference.dictionary_location(resource_root)
}

pub fn corpus_location(resource_root: &str) -> String {
    FuzzTarget::CollectionReference.corpus_location(resource_root)
}

/// Resolve `data` as a collection path and as a document path.
pub fn fuzz_test_collection_reference(data: &[u8]) -> i32 {
    let _ = run_references(data);
    CONTINUE
}

/// Outcome of resolving one input both ways.
#[derive(Debug)]
pub struct ReferenceRun {
    pub collection: firequery::Result<()>,
    pub document: firequery::Result<()>,
}

/// The work behind the entry point, with each step's result kept.
pub fn run_references(data: &[u8]) -> ReferenceRun {
    let input = String::from_utf8_lossy(data);
    ReferenceRun {
        collection: exercise_collection(&input),
        document: exercise_document(&input),
    }
}

fn exercise_collection(path: &str) -> firequery::Result<()> {
    let collection = CollectionReference::new(path)?;

    let canonical = collection.path().canonical_string();
    assert_eq!(
        CollectionReference::new(&canonical).as_ref(),
        Ok(&collection),
        "canonical path {:?} does not resolve back to the collection",
        canonical
    );

    if let Some(parent) = collection.parent() {
        assert!(parent.path().is_immediate_parent_of(collection.path()));
        assert_eq!(parent.collection(collection.id())?, collection);
    }

    // The input doubles as a document ID and as a relative document path.
    let _ = collection.document(path);
    collection
        .query()
        .where_field(FieldPath::document_id(), Operator::Equal, path)?
        .validate_for_execution()
}

fn exercise_document(path: &str) -> firequery::Result<()> {
    let document = DocumentReference::new(path)?;
    let parent = document.parent();

    assert!(parent.path().is_immediate_parent_of(document.path()));
    assert_eq!(parent.document(document.id())?, document);

    let _ = document.collection(path);
    Ok(())
}
