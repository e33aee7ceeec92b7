//! Error types for the harness bootstrap.
//!
//! The resource locator and the entry points never fail; these errors come
//! from the parts that touch the filesystem or parse user input.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A target name did not match any known fuzz target.
    #[error("Unknown fuzz target '{0}'. Expected one of: FieldPath, CollectionReference, FIRQuery")]
    UnknownTarget(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
