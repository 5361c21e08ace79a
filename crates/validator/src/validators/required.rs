//! Presence check

use serde_json::Value;

use crate::foundation::{LeafOutcome, MessageParams, Rule};

leaf_rule! {
    /// Fails on `null` (or an absent field) and on the empty string.
    ///
    /// Every other value passes, including `0`, `false` and empty arrays.
    pub struct IsRequired as "isRequired" {}
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        let missing = match &value {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        };
        if missing {
            return self.reject(value, "'%name%' should not be empty.", &MessageParams::new(ctx.label));
        }
        LeafOutcome::pass(value)
    }
}

impl IsRequired {
    /// Creates the rule with its default message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: crate::foundation::RuleMessage::default_only(),
        }
    }
}

impl Default for IsRequired {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an [`IsRequired`] rule.
#[must_use]
pub fn is_required() -> Rule {
    IsRequired::new().into()
}
