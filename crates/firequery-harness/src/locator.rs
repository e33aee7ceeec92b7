//! Dictionary and corpus locations for each fuzz target.
//!
//! Resources live under a caller-supplied root, one directory per owning
//! target:
//!
//! ```text
//! <root>/<Owner>/<owner>.dictionary
//! <root>/<Owner>/Corpus/
//! ```
//!
//! Paths are built with `/` and returned whether or not they exist. The root
//! is used verbatim: it is not checked for emptiness and a trailing separator
//! is not stripped.
//!
//! # Example
//!
//! ```
//! use firequery_harness::FuzzTarget;
//!
//! let locations = FuzzTarget::CollectionReference.resource_locations("/res");
//! assert_eq!(locations.dictionary, "/res/FieldPath/fieldpath.dictionary");
//! assert_eq!(locations.corpus, "/res/FieldPath/Corpus");
//! ```

use serde::Serialize;

use crate::target::FuzzTarget;

/// Name of the seed directory inside a target's resource directory.
pub const CORPUS_DIRECTORY: &str = "Corpus";

/// File extension of token dictionaries.
pub const DICTIONARY_EXTENSION: &str = "dictionary";

/// Resolved resource paths for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLocations {
    pub target: FuzzTarget,
    /// The target whose resources were resolved.
    pub owner: FuzzTarget,
    pub dictionary: String,
    pub corpus: String,
}

/// Location of the token dictionary used for `target`.
pub fn dictionary_location(resource_root: &str, target: FuzzTarget) -> String {
    let owner = target.resource_owner().name();
    format!(
        "{}/{}/{}.{}",
        resource_root,
        owner,
        owner.to_lowercase(),
        DICTIONARY_EXTENSION
    )
}

/// Location of the seed corpus directory used for `target`.
pub fn corpus_location(resource_root: &str, target: FuzzTarget) -> String {
    let owner = target.resource_owner().name();
    format!("{}/{}/{}", resource_root, owner, CORPUS_DIRECTORY)
}

pub fn resource_locations(resource_root: &str, target: FuzzTarget) -> ResourceLocations {
    ResourceLocations {
        target,
        owner: target.resource_owner(),
        dictionary: dictionary_location(resource_root, target),
        corpus: corpus_location(resource_root, target),
    }
}
