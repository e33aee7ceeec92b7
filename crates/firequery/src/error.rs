//! Error types for the firequery library.

use thiserror::Error;

/// Main error type for path parsing and query construction.
///
/// Every variant is a recoverable rejection of caller input. Internal
/// consistency failures are not represented here; they panic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A user-supplied dot-separated or segment-list field path is malformed.
    #[error("Invalid field path ({path}). {reason}")]
    InvalidFieldPath { path: String, reason: String },

    /// A canonical (server format) field path failed to parse.
    #[error("Invalid field path ({path}) at offset {offset}: {reason}")]
    FieldPathSyntax {
        path: String,
        offset: usize,
        reason: String,
    },

    /// A slash-separated resource path is malformed.
    #[error("Invalid path ({0}). Paths must not contain // in them.")]
    InvalidPath(String),

    /// A collection path has an even number of segments.
    #[error(
        "Invalid collection reference. Collection references must have an odd number \
         of segments, but {path} has {segments}"
    )]
    InvalidCollectionReference { path: String, segments: usize },

    /// A document path has an odd number of segments.
    #[error(
        "Invalid document reference. Document references must have an even number \
         of segments, but {path} has {segments}"
    )]
    InvalidDocumentReference { path: String, segments: usize },

    /// A query violates one of the construction rules.
    #[error("Invalid Query. {0}")]
    InvalidQuery(String),

    /// A textual query descriptor failed to parse.
    #[error("Descriptor error at offset {offset}: {message}")]
    Descriptor { offset: usize, message: String },
}

impl Error {
    pub(crate) fn query(message: impl Into<String>) -> Self {
        Error::InvalidQuery(message.into())
    }

    pub(crate) fn descriptor(offset: usize, message: impl Into<String>) -> Self {
        Error::Descriptor {
            offset,
            message: message.into(),
        }
    }
}

/// Result type alias for firequery operations.
pub type Result<T> = std::result::Result<T, Error>;
