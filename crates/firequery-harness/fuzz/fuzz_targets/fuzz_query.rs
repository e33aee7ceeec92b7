//! Fuzz target for query descriptor decoding and query construction.
//!
//! ```bash
//! cargo fuzz run fuzz_query resources/FIRQuery/Corpus -- \
//!     -dict=resources/FIRQuery/firquery.dictionary
//! ```
//!
//! `firequery-fuzz args query --resources resources` prints the same
//! command line.

#![no_main]

use firequery_harness::targets::query::fuzz_test_query;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    fuzz_test_query(data);
});
