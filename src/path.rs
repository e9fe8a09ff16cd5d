//! Attribute paths for locating the offending field in nested error payloads.
//!
//! [`AttrPath`] records the field names and item positions leading to a
//! nested validation failure and renders them as the `attr` string of a
//! canonical error record.

use std::fmt::{self, Display};

/// Separator used to join nested field names when none is configured.
pub const DEFAULT_SEPARATOR: &str = "__";

/// Keys that frameworks use for errors which belong to no single field.
///
/// A path consisting of exactly one of these renders as a null `attr`.
pub const NON_FIELD_KEYS: &[&str] = &["__all__", "non_field_errors"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum PathSegment {
    /// A named field (e.g. `email`)
    Field(String),
    /// A position inside a many-valued field (e.g. the `0` in `items__0__name`)
    Index(usize),
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// The path from the root of an error payload to a failing field.
///
/// Paths are immutable; `push_*` returns a new path so that sibling branches
/// of a nested payload never observe each other's segments.
///
/// # Example
///
/// ```rust
/// use error_envelope::AttrPath;
///
/// let path = AttrPath::root()
///     .push_field("hedgehogs")
///     .push_index(0)
///     .push_field("name");
///
/// assert_eq!(path.join("__").as_deref(), Some("hedgehogs__0__name"));
/// assert_eq!(path.join(".").as_deref(), Some("hedgehogs.0.name"));
/// assert_eq!(AttrPath::root().join("__"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct AttrPath {
    segments: Vec<PathSegment>,
}

impl AttrPath {
    /// Creates an empty path representing the top level of a payload.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Renders the path as an `attr` value.
    ///
    /// Segments are joined with `separator` without any escaping, so a field
    /// name that itself contains the separator is indistinguishable from a
    /// nested path. Returns `None` for the root path, and for a path whose
    /// joined form is one of the [`NON_FIELD_KEYS`].
    pub fn join(&self, separator: &str) -> Option<String> {
        let joined = self
            .segments
            .iter()
            .map(|segment| segment.to_string())
            .collect::<Vec<_>>()
            .join(separator);

        if joined.is_empty() || NON_FIELD_KEYS.contains(&joined.as_str()) {
            None
        } else {
            Some(joined)
        }
    }
}

impl Display for AttrPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(DEFAULT_SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}
