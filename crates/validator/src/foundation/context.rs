//! Validation contexts
//!
//! A [`ValidationContext`] is what a caller hands to a rule set: where in the
//! tree we are, which early-exit policy applies and which sibling values are
//! visible. The rule set derives one [`RuleContext`] per field from it. Both
//! are borrowed views rebuilt on every call; recursion extends the path
//! instead of mutating it.

use serde_json::{Map, Value};

use crate::foundation::path::Path;

// ============================================================================
// VALIDATION CONTEXT
// ============================================================================

/// Per-call settings for [`RuleSet::validate`](crate::combinators::RuleSet::validate).
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Path of the enclosing object (or, for array elements, of the element).
    pub path: &'a Path,
    /// Stop the rule pipeline after its first failure.
    pub return_early: bool,
    /// Keep nested errors as trees instead of flattening them.
    pub show_nested_error: bool,
    /// The value is an array element; `path` already ends with its index.
    pub is_array_elem: bool,
    /// Values of the object currently being validated.
    pub all_values: Option<&'a Map<String, Value>>,
}

impl<'a> ValidationContext<'a> {
    /// Context for a field directly under `path` with every policy off.
    #[must_use]
    pub fn new(path: &'a Path) -> Self {
        Self {
            path,
            return_early: false,
            show_nested_error: false,
            is_array_elem: false,
            all_values: None,
        }
    }

    /// Sets the rule-level early-exit policy.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_return_early(mut self, return_early: bool) -> Self {
        self.return_early = return_early;
        self
    }

    /// Sets whether nested errors are kept as trees.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_show_nested_error(mut self, show_nested_error: bool) -> Self {
        self.show_nested_error = show_nested_error;
        self
    }

    /// Marks the value as an array element.
    #[must_use = "builder methods must be chained or built"]
    pub fn as_array_elem(mut self) -> Self {
        self.is_array_elem = true;
        self
    }

    /// Exposes sibling values to cross-field rules.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_all_values(mut self, all_values: Option<&'a Map<String, Value>>) -> Self {
        self.all_values = all_values;
        self
    }

    /// Path of the field `key` under this context.
    ///
    /// Array elements are addressed by the index already present in `path`,
    /// so the key is not appended for them.
    #[must_use]
    pub fn field_path(&self, key: &str) -> Path {
        if self.is_array_elem {
            self.path.clone()
        } else {
            self.path.child(key)
        }
    }
}

// ============================================================================
// RULE CONTEXT
// ============================================================================

/// What a single rule sees about the field it is checking.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Field key in the enclosing object.
    pub key: &'a str,
    /// Display name used in messages (`%name%`).
    pub label: &'a str,
    /// Full path of the value being checked.
    pub path: &'a Path,
    /// Keep nested errors as trees.
    pub show_nested_error: bool,
    /// Early-exit policy forwarded to nested structures.
    pub return_early: bool,
    /// Values of the enclosing object, for cross-field checks.
    pub all_values: Option<&'a Map<String, Value>>,
}

impl<'a> RuleContext<'a> {
    /// Context for checking `key` at `path`, labelled by its key.
    #[must_use]
    pub fn new(key: &'a str, path: &'a Path) -> Self {
        Self {
            key,
            label: key,
            path,
            show_nested_error: false,
            return_early: false,
            all_values: None,
        }
    }

    /// Overrides the display label.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Exposes sibling values.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_all_values(mut self, all_values: &'a Map<String, Value>) -> Self {
        self.all_values = Some(all_values);
        self
    }

    /// Looks up a sibling field of the value being checked.
    #[must_use]
    pub fn sibling(&self, key: &str) -> Option<&'a Value> {
        self.all_values.and_then(|values| values.get(key))
    }
}
