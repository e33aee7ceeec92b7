//! Fuzz entry points, one per parsing surface.
//!
//! Every entry point has the shape `fn(&[u8]) -> i32` and returns
//! [`CONTINUE`]. Inputs the library rejects with a [`firequery::Error`] are
//! expected and dropped. Anything else (a panic in the library, or a failed
//! consistency assertion in the entry point) is left to unwind or abort so
//! the fuzzing engine records it as a crash. Entry points hold no state
//! between calls and do not keep `data` past return.

pub mod collection_reference;
pub mod field_path;
pub mod query;

/// Status telling the engine to keep going.
pub const CONTINUE: i32 = 0;

/// Collection used when an input is needed as a field path but cannot name
/// a collection itself.
pub(crate) const SCRATCH_COLLECTION: &str = "fuzz";
