//! Paths locating a value (or an error) inside a value tree.
//!
//! A [`Path`] is an ordered list of [`PathSegment`]s from the root object to
//! the current field. Object keys are stored as [`PathSegment::Key`], array
//! positions as [`PathSegment::Index`]. Paths are extended, never mutated in
//! place: every recursion level derives its own child path.

use std::fmt;

use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// One step in a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A key of an object.
    Key(String),
    /// A position inside an array.
    Index(usize),
}

impl PathSegment {
    /// Returns the key if this segment addresses an object field.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    /// Returns the index if this segment addresses an array element.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Key(_) => None,
            PathSegment::Index(index) => Some(*index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_owned())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

// Keys serialize as strings and indices as integers, so a path renders as
// `["users", 0, "email"]`.
impl Serialize for PathSegment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathSegment::Key(key) => serializer.serialize_str(key),
            PathSegment::Index(index) => serializer.serialize_u64(*index as u64),
        }
    }
}

// ============================================================================
// PATH
// ============================================================================

/// Ordered list of segments from the root of a value tree to a field.
///
/// Most schemas are a handful of levels deep, so segments are kept inline.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::foundation::{Path, PathSegment};
///
/// let path = Path::root().child("users").child(0usize).child("email");
/// assert_eq!(path.to_string(), "users[0].email");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: SmallVec<[PathSegment; 6]>,
}

impl Path {
    /// The empty path (the root object itself).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `segment` appended.
    #[must_use]
    pub fn child(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The last segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Iterates over the segments, root first.
    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.segments.iter()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl PartialEq<[PathSegment]> for Path {
    fn eq(&self, other: &[PathSegment]) -> bool {
        self.segments.as_slice() == other
    }
}

/// Dotted form with bracketed indices, e.g. `users[0].email`.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.segments.iter())
    }
}

/// Builds a [`Path`] from a list of keys and indices.
///
/// ```rust,ignore
/// let p = path!["users", 0usize, "email"];
/// ```
#[macro_export]
macro_rules! path {
    () => { $crate::foundation::Path::root() };
    ($($segment:expr),+ $(,)?) => {
        $crate::foundation::Path::root()$(.child($segment))+
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_does_not_touch_parent() {
        let parent = Path::root().child("user");
        let child = parent.child("address");

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.last(), Some(&PathSegment::Key("address".into())));
    }

    #[test]
    fn display_uses_brackets_for_indices() {
        let path = Path::root().child("users").child(2usize).child("email");
        assert_eq!(path.to_string(), "users[2].email");
    }

    #[test]
    fn root_is_empty() {
        assert!(Path::root().is_empty());
        assert_eq!(Path::root().to_string(), "");
    }

    #[test]
    fn serializes_as_mixed_array() {
        let path = crate::path!["users", 0usize, "email"];
        let json = serde_json::to_value(&path).unwrap();
        assert_eq!(json, serde_json::json!(["users", 0, "email"]));
    }

    #[test]
    fn collects_from_iterator() {
        let path: Path = ["a", "b"].into_iter().collect();
        assert_eq!(path.to_string(), "a.b");
    }
}
