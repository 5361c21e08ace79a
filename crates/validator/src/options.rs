//! Validator policy options.
//!
//! Three flags control early termination and error shape:
//!
//! | flag | effect |
//! |------|--------|
//! | `return_early` | stop checking further fields after the first failing field |
//! | `return_rule_set_early` | stop a field's rule pipeline after its first failing rule |
//! | `show_nested_error` | keep nested object/array errors as trees instead of flattening them |
//!
//! Each flag can be set when the [`Validator`](crate::Validator) is built
//! ([`ValidatorOptions`]) or when it is called ([`ValidateOptions`]). A flag
//! set at construction always wins; otherwise the call-time value is used;
//! otherwise the flag is off. [`Policy::resolve`] applies that rule once per
//! call.
//!
//! Both option types deserialize from camelCase JSON:
//!
//! ```rust,ignore
//! let options: ValidatorOptions = serde_json::from_str(r#"{"returnEarly": true}"#)?;
//! ```

use serde::Deserialize;

use crate::foundation::Path;

/// Constructor-time policy. Unset flags defer to the call site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Stop after the first failing field.
    pub return_early: Option<bool>,
    /// Stop each field's pipeline after its first failing rule.
    pub return_rule_set_early: Option<bool>,
    /// Keep nested errors as trees.
    pub show_nested_error: Option<bool>,
}

impl ValidatorOptions {
    /// No flag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `return_early`.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_early(mut self, value: bool) -> Self {
        self.return_early = Some(value);
        self
    }

    /// Sets `return_rule_set_early`.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_rule_set_early(mut self, value: bool) -> Self {
        self.return_rule_set_early = Some(value);
        self
    }

    /// Sets `show_nested_error`.
    #[must_use = "builder methods must be chained or built"]
    pub fn show_nested_error(mut self, value: bool) -> Self {
        self.show_nested_error = Some(value);
        self
    }
}

/// Call-time policy and the path the validated object lives at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ValidateOptions {
    /// Path of the validated object inside a larger tree.
    #[serde(skip)]
    pub path: Path,
    /// Stop after the first failing field.
    pub return_early: Option<bool>,
    /// Stop each field's pipeline after its first failing rule.
    pub return_rule_set_early: Option<bool>,
    /// Keep nested errors as trees.
    pub show_nested_error: Option<bool>,
}

impl ValidateOptions {
    /// No flag set, root path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the starting path.
    #[must_use = "builder methods must be chained or built"]
    pub fn at(mut self, path: Path) -> Self {
        self.path = path;
        self
    }

    /// Sets `return_early`.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_early(mut self, value: bool) -> Self {
        self.return_early = Some(value);
        self
    }

    /// Sets `return_rule_set_early`.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_rule_set_early(mut self, value: bool) -> Self {
        self.return_rule_set_early = Some(value);
        self
    }

    /// Sets `show_nested_error`.
    #[must_use = "builder methods must be chained or built"]
    pub fn show_nested_error(mut self, value: bool) -> Self {
        self.show_nested_error = Some(value);
        self
    }
}

/// Constructor value, else call-time value, else `false`.
#[inline]
#[must_use]
pub fn resolve_flag(constructor: Option<bool>, call: Option<bool>) -> bool {
    constructor.or(call).unwrap_or(false)
}

/// Effective flags for one `validate` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    /// Stop after the first failing field.
    pub return_early: bool,
    /// Stop each field's pipeline after its first failing rule.
    pub return_rule_set_early: bool,
    /// Keep nested errors as trees.
    pub show_nested_error: bool,
}

impl Policy {
    /// Merges constructor and call-time options.
    #[must_use]
    pub fn resolve(constructor: &ValidatorOptions, call: &ValidateOptions) -> Self {
        Self {
            return_early: resolve_flag(constructor.return_early, call.return_early),
            return_rule_set_early: resolve_flag(
                constructor.return_rule_set_early,
                call.return_rule_set_early,
            ),
            show_nested_error: resolve_flag(constructor.show_nested_error, call.show_nested_error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, false)]
    #[case(None, Some(true), true)]
    #[case(None, Some(false), false)]
    #[case(Some(true), None, true)]
    #[case(Some(false), None, false)]
    #[case(Some(true), Some(false), true)]
    #[case(Some(false), Some(true), false)]
    fn constructor_wins_then_call_then_default(
        #[case] constructor: Option<bool>,
        #[case] call: Option<bool>,
        #[case] expected: bool,
    ) {
        assert_eq!(resolve_flag(constructor, call), expected);
    }

    #[test]
    fn resolves_each_flag_independently() {
        let constructor = ValidatorOptions::new().return_early(false);
        let call = ValidateOptions::new()
            .return_early(true)
            .return_rule_set_early(true);

        let policy = Policy::resolve(&constructor, &call);
        assert_eq!(
            policy,
            Policy {
                return_early: false,
                return_rule_set_early: true,
                show_nested_error: false,
            }
        );
    }

    #[test]
    fn deserializes_camel_case() {
        let options: ValidatorOptions =
            serde_json::from_str(r#"{"returnEarly": true, "showNestedError": false}"#).unwrap();
        assert_eq!(options.return_early, Some(true));
        assert_eq!(options.return_rule_set_early, None);
        assert_eq!(options.show_nested_error, Some(false));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = serde_json::from_str::<ValidatorOptions>(r#"{"returnEarlyy": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_non_boolean_flags() {
        let result = serde_json::from_str::<ValidateOptions>(r#"{"returnEarly": "yes"}"#);
        assert!(result.is_err());
    }
}
