//! Slash-separated resource paths (`rooms/eros/messages`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A path to a collection or document, relative to the database root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    /// Parse a slash-separated path.
    ///
    /// Leading and trailing slashes are ignored; an embedded `//` is an error.
    pub fn parse(path: &str) -> Result<Self> {
        if path.contains("//") {
            return Err(Error::InvalidPath(path.to_string()));
        }

        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last_segment(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path with its last segment removed.
    pub fn without_last(&self) -> Self {
        let keep = self.segments.len().saturating_sub(1);
        Self {
            segments: self.segments[..keep].to_vec(),
        }
    }

    /// Concatenate `child` onto this path.
    pub fn join(&self, child: &ResourcePath) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        Self { segments }
    }

    /// Append a single segment. The caller guarantees it contains no `/`.
    pub(crate) fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Whether `self` is the immediate parent of `other`.
    pub fn is_immediate_parent_of(&self, other: &ResourcePath) -> bool {
        self.segments.len() + 1 == other.segments.len()
            && other.segments.starts_with(&self.segments)
    }

    pub fn canonical_string(&self) -> String {
        self.segments.join("/")
    }
}

/// Segments must be non-empty and free of `/`.
impl TryFrom<Vec<String>> for ResourcePath {
    type Error = Error;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        if segments
            .iter()
            .any(|segment| segment.is_empty() || segment.contains('/'))
        {
            return Err(Error::InvalidPath(segments.join("/")));
        }
        Ok(Self { segments })
    }
}

impl From<ResourcePath> for Vec<String> {
    fn from(path: ResourcePath) -> Self {
        path.segments
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}
