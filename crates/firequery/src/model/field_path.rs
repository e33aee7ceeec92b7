//! Field paths: dotted references to (possibly nested) fields of a document.
//!
//! Two textual forms exist:
//!
//! - the **user format** (`a.b.c`), which is what application code writes and
//!   which forbids the characters `~ * / [ ]`;
//! - the **server format** (`` a.`b.c`.d ``), a canonical encoding where any
//!   segment that is not a simple identifier is wrapped in backticks and
//!   `\` escapes the next character.
//!
//! # Example
//!
//! ```
//! use firequery::FieldPath;
//!
//! let path = FieldPath::from_dot_separated("address.city").unwrap();
//! assert_eq!(path.len(), 2);
//!
//! let quoted = FieldPath::from_segments(["odd.name", "x"]).unwrap();
//! assert_eq!(quoted.canonical_string(), "`odd.name`.x");
//! ```

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the special field path that refers to a document's ID.
pub const DOCUMENT_KEY_NAME: &str = "__name__";

/// Characters that are not allowed in user-format field paths.
const RESERVED_CHARACTERS: &[char] = &['~', '*', '/', '[', ']'];

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern compiles"));

const EMPTY_SEGMENT_REASON: &str =
    "Paths must not be empty, begin with '.', end with '.', or contain '..'";

/// A path to a field within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a user-format, dot-separated path such as `a.b.c`.
    pub fn from_dot_separated(path: &str) -> Result<Self> {
        if path.contains(RESERVED_CHARACTERS) {
            return Err(Error::InvalidFieldPath {
                path: path.to_string(),
                reason: "Paths must not contain '~', '*', '/', '[', or ']'".to_string(),
            });
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::InvalidFieldPath {
                path: path.to_string(),
                reason: EMPTY_SEGMENT_REASON.to_string(),
            });
        }

        Ok(Self { segments })
    }

    /// Build a path from explicit segments. Segments may contain any
    /// character, including `.` and the reserved user-format characters.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(Error::InvalidFieldPath {
                path: String::new(),
                reason: "Provided names must not be empty.".to_string(),
            });
        }
        if let Some(index) = segments.iter().position(String::is_empty) {
            return Err(Error::InvalidFieldPath {
                path: segments.join("."),
                reason: format!("Field name at index {} must not be empty.", index),
            });
        }

        Ok(Self { segments })
    }

    /// Parse the canonical server format produced by [`canonical_string`].
    ///
    /// [`canonical_string`]: FieldPath::canonical_string
    pub fn from_server_format(path: &str) -> Result<Self> {
        let syntax_error = |offset: usize, reason: &str| Error::FieldPathSyntax {
            path: path.to_string(),
            offset,
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        let mut segment = String::new();
        let mut inside_backticks = false;
        let mut chars = path.char_indices();

        while let Some((offset, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => segment.push(escaped),
                    None => return Err(syntax_error(offset, "trailing escape character")),
                },
                '.' if !inside_backticks => {
                    if segment.is_empty() {
                        return Err(syntax_error(offset, EMPTY_SEGMENT_REASON));
                    }
                    segments.push(std::mem::take(&mut segment));
                }
                '`' => inside_backticks = !inside_backticks,
                _ => segment.push(c),
            }
        }

        if inside_backticks {
            return Err(syntax_error(path.len(), "unterminated `"));
        }
        if segment.is_empty() {
            return Err(syntax_error(path.len(), EMPTY_SEGMENT_REASON));
        }
        segments.push(segment);

        Ok(Self { segments })
    }

    /// The path that refers to a document's ID.
    pub fn document_id() -> Self {
        Self {
            segments: vec![DOCUMENT_KEY_NAME.to_string()],
        }
    }

    /// Whether this is the document ID path.
    pub fn is_key_field_path(&self) -> bool {
        self.segments.len() == 1 && self.segments[0] == DOCUMENT_KEY_NAME
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first_segment(&self) -> &str {
        &self.segments[0]
    }

    pub fn last_segment(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Return a new path with `segment` appended.
    pub fn append(&self, segment: impl Into<String>) -> Result<Self> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(Error::InvalidFieldPath {
                path: self.canonical_string(),
                reason: "Appended field name must not be empty.".to_string(),
            });
        }
        let mut segments = self.segments.clone();
        segments.push(segment);
        Ok(Self { segments })
    }

    /// Return the path without its first segment, or `None` for a
    /// single-segment path.
    pub fn pop_first(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[1..].to_vec(),
        })
    }

    /// Whether every segment of `self` is a leading segment of `other`.
    pub fn is_prefix_of(&self, other: &FieldPath) -> bool {
        self.segments.len() <= other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|(a, b)| a == b)
    }

    /// Encode the path in server format.
    pub fn canonical_string(&self) -> String {
        self.segments
            .iter()
            .map(|segment| escape_segment(segment))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl TryFrom<Vec<String>> for FieldPath {
    type Error = Error;

    fn try_from(segments: Vec<String>) -> Result<Self> {
        Self::from_segments(segments)
    }
}

impl From<FieldPath> for Vec<String> {
    fn from(path: FieldPath) -> Self {
        path.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

fn escape_segment(segment: &str) -> String {
    if IDENTIFIER.is_match(segment) {
        return segment.to_string();
    }

    let mut escaped = String::with_capacity(segment.len() + 2);
    escaped.push('`');
    for c in segment.chars() {
        if c == '\\' || c == '`' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('`');
    escaped
}
