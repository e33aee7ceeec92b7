//! Fuzz target for collection and document reference resolution.
//!
//! Shares the field path dictionary and corpus.
//!
//! ```bash
//! cargo fuzz run fuzz_collection_reference resources/FieldPath/Corpus -- \
//!     -dict=resources/FieldPath/fieldpath.dictionary
//! ```

#![no_main]

use firequery_harness::targets::collection_reference::fuzz_test_collection_reference;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    fuzz_test_collection_reference(data);
});
