//! Fuzz target for field path parsing.
//!
//! Feeds every input through the user-format, server-format and
//! segment-list constructors and checks that canonical strings parse back
//! to the same path.
//!
//! ```bash
//! cargo fuzz run fuzz_field_path resources/FieldPath/Corpus -- \
//!     -dict=resources/FieldPath/fieldpath.dictionary
//! ```

#![no_main]

use firequery_harness::targets::field_path::fuzz_test_field_path;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    fuzz_test_field_path(data);
});
