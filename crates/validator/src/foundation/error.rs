//! Error types
//!
//! Two unrelated kinds of failure live here:
//!
//! - [`SchemaError`] is returned while *building* a schema (empty rule set,
//!   inconsistent bounds, malformed message template, bad regex). It is a
//!   programming error and is surfaced through `Result`.
//! - [`FieldError`] and [`ErrorTree`] describe *validation failures*. They are
//!   ordinary data returned alongside the transformed values, never `Err`.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::foundation::message::FormatError;
use crate::foundation::path::Path;

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Error raised while constructing rules, rule sets or validators.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A rule set was declared without any rule.
    #[error("rule set for `{field}` should not be empty")]
    EmptyRuleSet {
        /// Field the rule set was declared for (`<anonymous>` when unbound).
        field: String,
    },

    /// An option has a value the rule cannot work with.
    #[error("`{rule}`: option `{option}` {reason}")]
    InvalidOption {
        /// Rule name.
        rule: &'static str,
        /// Option name.
        option: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A rule needs at least one option that was not given.
    #[error("`{rule}`: {requirement}")]
    MissingOption {
        /// Rule name.
        rule: &'static str,
        /// Human readable description of what is required.
        requirement: &'static str,
    },

    /// A regular expression failed to compile.
    #[error("`{rule}`: invalid regex: {source}")]
    InvalidRegex {
        /// Rule name.
        rule: &'static str,
        /// Compiler error.
        #[source]
        source: regex::Error,
    },

    /// A custom message template is malformed.
    #[error("invalid message template: {0}")]
    Template(#[from] FormatError),

    /// The same field was declared twice.
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),

    /// The value handed to a validator is not an object.
    #[error("values to check should be an object, got {0}")]
    NotAnObject(&'static str),
}

impl SchemaError {
    pub(crate) fn invalid_option(
        rule: &'static str,
        option: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidOption {
            rule,
            option,
            reason: reason.into(),
        }
    }
}

/// Result of building a schema component.
pub type SchemaResult<T> = Result<T, SchemaError>;

// ============================================================================
// FIELD ERROR
// ============================================================================

/// Payload of a [`FieldError`].
///
/// Leaf rules always report a message. A structural rule reports the nested
/// [`ErrorTree`] itself when nested errors are kept (`show_nested_error`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// Rendered message.
    Message(String),
    /// Errors of a nested object or array, keyed by field or index.
    Nested(ErrorTree),
}

impl ErrorDetail {
    /// Returns the message for leaf failures.
    #[must_use]
    pub fn as_message(&self) -> Option<&str> {
        match self {
            ErrorDetail::Message(message) => Some(message),
            ErrorDetail::Nested(_) => None,
        }
    }

    /// Returns the nested tree for structural failures.
    #[must_use]
    pub fn as_nested(&self) -> Option<&ErrorTree> {
        match self {
            ErrorDetail::Message(_) => None,
            ErrorDetail::Nested(tree) => Some(tree),
        }
    }
}

impl fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorDetail::Message(message) => f.write_str(message),
            ErrorDetail::Nested(tree) => write!(f, "{} nested error(s)", tree.total_errors()),
        }
    }
}

/// One failed rule on one field.
///
/// Serializes as `{"error", "validator", "value", "path"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// What went wrong.
    pub error: ErrorDetail,
    /// Name of the rule that failed, e.g. `isLen`.
    pub validator: &'static str,
    /// The value as the failing rule returned it.
    pub value: Value,
    /// Location of the value in the validated tree.
    pub path: Path,
}

impl FieldError {
    /// Returns the message for leaf failures.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error.as_message()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.validator, self.error)
        } else {
            write!(f, "[{}] {}: {}", self.path, self.validator, self.error)
        }
    }
}

// ============================================================================
// ERROR TREE
// ============================================================================

/// Field name (or array index rendered as a string) → errors for that entry.
///
/// Entries keep insertion order, which follows schema declaration order for
/// objects and ascending index order for arrays. An empty tree means "no
/// error"; APIs hand out `Option<ErrorTree>` and never `Some(empty)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ErrorTree {
    entries: IndexMap<String, Vec<FieldError>>,
}

impl ErrorTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the errors of one entry; an empty list is ignored.
    pub fn insert(&mut self, key: impl Into<String>, errors: Vec<FieldError>) {
        if !errors.is_empty() {
            self.entries.insert(key.into(), errors);
        }
    }

    /// Errors recorded for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[FieldError]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Returns true if `key` has errors.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries (fields or indices) with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(key, errors)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldError])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `None` for an empty tree, `Some(self)` otherwise.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() { None } else { Some(self) }
    }

    /// Consumes the tree, concatenating every entry's errors in order.
    ///
    /// This is the flattening applied when nested errors are hidden.
    #[must_use]
    pub fn into_flat(self) -> Vec<FieldError> {
        self.entries.into_values().flatten().collect()
    }

    /// Counts leaf errors, descending into nested trees.
    #[must_use]
    pub fn total_errors(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .map(|e| match &e.error {
                ErrorDetail::Message(_) => 1,
                ErrorDetail::Nested(tree) => tree.total_errors(),
            })
            .sum()
    }

    /// Collects every leaf error depth-first, in insertion order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&FieldError> {
        let mut out = Vec::new();
        for error in self.entries.values().flatten() {
            match &error.error {
                ErrorDetail::Message(_) => out.push(error),
                ErrorDetail::Nested(tree) => out.extend(tree.leaves()),
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a ErrorTree {
    type Item = (&'a String, &'a Vec<FieldError>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<FieldError>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.leaves();
        writeln!(f, "Validation failed with {} error(s):", leaves.len())?;
        for (i, error) in leaves.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorTree {}
