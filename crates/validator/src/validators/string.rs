//! String type check and case conversions

use serde_json::Value;

use crate::foundation::{LeafOutcome, MessageParams, Rule, RuleMessage};

// ============================================================================
// IS STRING
// ============================================================================

leaf_rule! {
    /// Fails on any non-string value except `null`.
    pub struct IsString as "isString" {}
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        match value {
            Value::String(_) | Value::Null => LeafOutcome::pass(value),
            other => self.reject(other, "'%name%' should be a string.", &MessageParams::new(ctx.label)),
        }
    }
}

impl IsString {
    /// Creates the rule with its default message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: RuleMessage::default_only(),
        }
    }
}

impl Default for IsString {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an [`IsString`] rule.
#[must_use]
pub fn is_string() -> Rule {
    IsString::new().into()
}

// ============================================================================
// CASE CONVERSION
// ============================================================================

/// Target case of a [`ChangeCase`] rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// `toLowerCase`
    Lower,
    /// `toUpperCase`
    Upper,
}

/// Converts strings to lower or upper case; never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCase {
    case: Case,
}

impl ChangeCase {
    /// Creates the rule.
    #[must_use]
    pub const fn new(case: Case) -> Self {
        Self { case }
    }
}

impl crate::foundation::LeafRule for ChangeCase {
    fn name(&self) -> &'static str {
        match self.case {
            Case::Lower => "toLowerCase",
            Case::Upper => "toUpperCase",
        }
    }

    fn validate(&self, value: Value, _ctx: &crate::foundation::RuleContext<'_>) -> LeafOutcome {
        match value {
            Value::String(s) => LeafOutcome::pass(Value::String(match self.case {
                Case::Lower => s.to_lowercase(),
                Case::Upper => s.to_uppercase(),
            })),
            other => LeafOutcome::pass(other),
        }
    }
}

/// Lower-cases strings.
#[must_use]
pub fn to_lower_case() -> Rule {
    Rule::leaf(ChangeCase::new(Case::Lower))
}

/// Upper-cases strings.
#[must_use]
pub fn to_upper_case() -> Rule {
    Rule::leaf(ChangeCase::new(Case::Upper))
}
