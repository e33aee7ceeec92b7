//! Collection and document references.

use serde::{Deserialize, Serialize};

use super::resource_path::ResourcePath;
use crate::error::{Error, Result};
use crate::query::Query;

/// Length of generated document IDs.
const AUTO_ID_LENGTH: usize = 20;

const AUTO_ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// A reference to a collection: a path with an odd number of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ResourcePath", into = "ResourcePath")]
pub struct CollectionReference {
    path: ResourcePath,
}

impl CollectionReference {
    /// Resolve a slash-separated collection path.
    pub fn new(path: &str) -> Result<Self> {
        Self::from_path(ResourcePath::parse(path)?)
    }

    pub fn from_path(path: ResourcePath) -> Result<Self> {
        if path.len() % 2 != 1 {
            return Err(Error::InvalidCollectionReference {
                path: path.canonical_string(),
                segments: path.len(),
            });
        }
        Ok(Self { path })
    }

    /// The last segment of the collection path.
    pub fn id(&self) -> &str {
        self.path.last_segment().unwrap_or_default()
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// The document containing this collection, or `None` for a root
    /// collection.
    pub fn parent(&self) -> Option<DocumentReference> {
        let parent = self.path.without_last();
        if parent.is_empty() {
            None
        } else {
            Some(DocumentReference { path: parent })
        }
    }

    /// Resolve a document path relative to this collection.
    pub fn document(&self, path: &str) -> Result<DocumentReference> {
        let relative = ResourcePath::parse(path)?;
        DocumentReference::from_path(self.path.join(&relative))
    }

    /// A reference to a new document with a random 20-character ID.
    pub fn document_auto(&self) -> DocumentReference {
        let id: String = (0..AUTO_ID_LENGTH)
            .map(|_| AUTO_ID_ALPHABET[fastrand::usize(..AUTO_ID_ALPHABET.len())] as char)
            .collect();
        DocumentReference {
            path: self.path.child(id),
        }
    }

    /// An unfiltered query over this collection.
    pub fn query(&self) -> Query {
        Query::new(self.path.clone())
    }
}

/// A reference to a document: a path with an even, non-zero number of
/// segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ResourcePath", into = "ResourcePath")]
pub struct DocumentReference {
    path: ResourcePath,
}

impl DocumentReference {
    pub fn new(path: &str) -> Result<Self> {
        Self::from_path(ResourcePath::parse(path)?)
    }

    pub fn from_path(path: ResourcePath) -> Result<Self> {
        if path.is_empty() || path.len() % 2 != 0 {
            return Err(Error::InvalidDocumentReference {
                path: path.canonical_string(),
                segments: path.len(),
            });
        }
        Ok(Self { path })
    }

    pub fn id(&self) -> &str {
        self.path.last_segment().unwrap_or_default()
    }

    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// The collection containing this document.
    pub fn parent(&self) -> CollectionReference {
        CollectionReference {
            path: self.path.without_last(),
        }
    }

    /// Resolve a subcollection path relative to this document.
    pub fn collection(&self, path: &str) -> Result<CollectionReference> {
        let relative = ResourcePath::parse(path)?;
        CollectionReference::from_path(self.path.join(&relative))
    }
}

impl TryFrom<ResourcePath> for CollectionReference {
    type Error = Error;

    fn try_from(path: ResourcePath) -> Result<Self> {
        Self::from_path(path)
    }
}

impl From<CollectionReference> for ResourcePath {
    fn from(reference: CollectionReference) -> Self {
        reference.path
    }
}

impl TryFrom<ResourcePath> for DocumentReference {
    type Error = Error;

    fn try_from(path: ResourcePath) -> Result<Self> {
        Self::from_path(path)
    }
}

impl From<DocumentReference> for ResourcePath {
    fn from(reference: DocumentReference) -> Self {
        reference.path
    }
}
