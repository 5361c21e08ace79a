//! String length validators
//!
//! Length is measured in Unicode scalar values (chars), so `"héllo"` has
//! length 5. Non-string values pass through untouched.

use serde::Deserialize;
use serde_json::Value;

use crate::foundation::{LeafOutcome, MessageParams, Rule, RuleMessage, SchemaError, SchemaResult};
use crate::macros::bound_placeholders;

// ============================================================================
// LEN CONFIG
// ============================================================================

/// Length constraints of an [`IsLen`] rule. At least one must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LenConfig {
    /// Minimum number of characters.
    pub min: Option<usize>,
    /// Maximum number of characters.
    pub max: Option<usize>,
    /// Exact number of characters.
    pub eq: Option<usize>,
}

impl LenConfig {
    /// No constraint yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum length.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the exact length.
    #[must_use = "builder methods must be chained or built"]
    pub fn eq(mut self, eq: usize) -> Self {
        self.eq = Some(eq);
        self
    }
}

// ============================================================================
// IS LEN
// ============================================================================

leaf_rule! {
    /// Validates the character count of strings.
    ///
    /// Constraints are checked in order `eq`, `min`..`max`, `min`, `max`;
    /// only the first violation is reported.
    pub struct IsLen as "isLen" { config: LenConfig }
    placeholders(self) bound_placeholders(
        self.config.min.is_some(),
        self.config.max.is_some(),
        self.config.eq.is_some(),
    );
    validate(self, value, ctx) {
        let Value::String(s) = &value else {
            return LeafOutcome::pass(value);
        };
        let Some(default) = self.violation(s.chars().count()) else {
            return LeafOutcome::pass(value);
        };

        let params = MessageParams::new(ctx.label)
            .with_opt("min", self.config.min)
            .with_opt("max", self.config.max)
            .with_opt("eq", self.config.eq);
        self.reject(value, default, &params)
    }
}

impl IsLen {
    /// Creates the rule.
    ///
    /// Fails when no constraint is set or when `min > max`.
    pub fn new(config: LenConfig) -> SchemaResult<Self> {
        if config.min.is_none() && config.max.is_none() && config.eq.is_none() {
            return Err(SchemaError::MissingOption {
                rule: Self::NAME,
                requirement: "one of `min`, `max` or `eq` is required",
            });
        }
        if let (Some(min), Some(max)) = (config.min, config.max)
            && min > max
        {
            return Err(SchemaError::invalid_option(
                Self::NAME,
                "min",
                format!("({min}) should not be greater than `max` ({max})"),
            ));
        }
        Ok(Self {
            config,
            message: RuleMessage::default_only(),
        })
    }

    /// The configured constraints.
    #[must_use]
    pub fn config(&self) -> &LenConfig {
        &self.config
    }

    fn violation(&self, len: usize) -> Option<&'static str> {
        let LenConfig { min, max, eq } = self.config;
        if let Some(eq) = eq {
            return (len != eq).then_some("'%name%' should be %eq% characters long.");
        }
        match (min, max) {
            (Some(min), Some(max)) if len < min || len > max => {
                Some("'%name%' should be between %min% - %max% characters.")
            }
            (Some(min), _) if len < min => Some("'%name%' should not be less than %min% characters."),
            (_, Some(max)) if len > max => {
                Some("'%name%' should not be greater than %max% characters.")
            }
            _ => None,
        }
    }
}

/// Creates an [`IsLen`] rule.
pub fn is_len(config: LenConfig) -> SchemaResult<Rule> {
    Ok(IsLen::new(config)?.into())
}
