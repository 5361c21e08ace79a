//! Numeric checks and conversions
//!
//! Numbers may arrive as JSON numbers or as numeric strings (form inputs are
//! strings). A numeric string is a trimmed, non-empty decimal or exponent
//! literal with a finite value; `"inf"` and `"NaN"` are not numbers.
//!
//! Every rule here lets `null` through.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::foundation::{LeafOutcome, MessageParams, Rule, RuleMessage, SchemaError, SchemaResult};
use crate::macros::bound_placeholders;

/// Reads a number from a JSON number or a numeric string.
#[must_use]
pub fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// Reads an integral number; `4.0` and `"4"` are integral, `4.5` is not.
#[must_use]
pub fn parse_integer(value: &Value) -> Option<f64> {
    parse_number(value).filter(|n| n.fract() == 0.0)
}

/// Converts `n` to a JSON number, preferring an integer representation.
///
/// `i64::MAX as f64` rounds up to 2^63, which is out of `i64` range, so the
/// upper bound is exclusive.
fn to_json_number(n: f64) -> Option<Number> {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Some(Number::from(n as i64))
    } else {
        Number::from_f64(n)
    }
}

// ============================================================================
// RANGE CONFIG
// ============================================================================

/// Inclusive bounds of [`IsNumber`] and [`IsInt`]; both optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RangeConfig {
    /// Smallest accepted value.
    pub min: Option<f64>,
    /// Largest accepted value.
    pub max: Option<f64>,
}

impl RangeConfig {
    /// Unbounded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lower bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    #[must_use = "builder methods must be chained or built"]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    fn check(&self, rule: &'static str) -> SchemaResult<()> {
        for (option, bound) in [("min", self.min), ("max", self.max)] {
            if bound.is_some_and(f64::is_nan) {
                return Err(SchemaError::invalid_option(rule, option, "should be a number"));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(SchemaError::invalid_option(
                rule,
                "min",
                format!("({min}) should not be greater than `max` ({max})"),
            ));
        }
        Ok(())
    }

    fn placeholders(&self) -> smallvec::SmallVec<[&'static str; 4]> {
        bound_placeholders(self.min.is_some(), self.max.is_some(), false)
    }

    fn params<'a>(&self, label: &'a str) -> MessageParams<'a> {
        MessageParams::new(label)
            .with_opt("min", self.min)
            .with_opt("max", self.max)
    }

    /// Default message of the violated bound, if any.
    fn violation(&self, n: f64) -> Option<&'static str> {
        match (self.min, self.max) {
            (Some(min), Some(max)) if n < min || n > max => {
                Some("'%name%' should be between %min% - %max%.")
            }
            (Some(min), _) if n < min => Some("'%name%' should not be less than %min%."),
            (_, Some(max)) if n > max => Some("'%name%' should not be greater than %max%."),
            _ => None,
        }
    }
}

// ============================================================================
// IS NUMBER / IS INT
// ============================================================================

leaf_rule! {
    /// Checks that a value is a number (or numeric string) within range.
    ///
    /// The value itself is not converted; chain [`to_number`] for that.
    pub struct IsNumber as "isNumber" { range: RangeConfig }
    placeholders(self) self.range.placeholders();
    validate(self, value, ctx) {
        if value.is_null() {
            return LeafOutcome::pass(value);
        }
        let params = self.range.params(ctx.label);
        match parse_number(&value) {
            None => self.reject(value, "'%name%' should be a number.", &params),
            Some(n) => match self.range.violation(n) {
                Some(default) => self.reject(value, default, &params),
                None => LeafOutcome::pass(value),
            },
        }
    }
}

impl IsNumber {
    /// Creates the rule; `min > max` is rejected.
    pub fn new(range: RangeConfig) -> SchemaResult<Self> {
        range.check(Self::NAME)?;
        Ok(Self {
            range,
            message: RuleMessage::default_only(),
        })
    }
}

leaf_rule! {
    /// Checks that a value is an integral number (or integral numeric
    /// string) within range.
    pub struct IsInt as "isInt" { range: RangeConfig }
    placeholders(self) self.range.placeholders();
    validate(self, value, ctx) {
        if value.is_null() {
            return LeafOutcome::pass(value);
        }
        let params = self.range.params(ctx.label);
        match parse_integer(&value) {
            None => self.reject(value, "'%name%' should be an integer.", &params),
            Some(n) => match self.range.violation(n) {
                Some(default) => self.reject(value, default, &params),
                None => LeafOutcome::pass(value),
            },
        }
    }
}

impl IsInt {
    /// Creates the rule; `min > max` is rejected.
    pub fn new(range: RangeConfig) -> SchemaResult<Self> {
        range.check(Self::NAME)?;
        Ok(Self {
            range,
            message: RuleMessage::default_only(),
        })
    }
}

/// Creates an [`IsNumber`] rule.
pub fn is_number(range: RangeConfig) -> SchemaResult<Rule> {
    Ok(IsNumber::new(range)?.into())
}

/// Creates an [`IsInt`] rule.
pub fn is_int(range: RangeConfig) -> SchemaResult<Rule> {
    Ok(IsInt::new(range)?.into())
}

// ============================================================================
// CONVERSIONS
// ============================================================================

leaf_rule! {
    /// Converts numeric strings to numbers.
    ///
    /// Integral values become JSON integers (`"42"` → `42`), others floats.
    /// Numbers pass unchanged; anything else fails.
    pub struct ToNumber as "toNumber" {}
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        match value {
            Value::Null | Value::Number(_) => LeafOutcome::pass(value),
            other => match parse_number(&other).and_then(to_json_number) {
                Some(n) => LeafOutcome::pass(Value::Number(n)),
                None => self.reject(other, "'%name%' should be a number.", &MessageParams::new(ctx.label)),
            },
        }
    }
}

impl ToNumber {
    /// Creates the rule with its default message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: RuleMessage::default_only(),
        }
    }
}

impl Default for ToNumber {
    fn default() -> Self {
        Self::new()
    }
}

leaf_rule! {
    /// Converts integral numbers and numeric strings to JSON integers
    /// (`"7"` → `7`, `7.0` → `7`); fails on everything else.
    pub struct ToInt as "toInt" {}
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        if value.is_null() {
            return LeafOutcome::pass(value);
        }
        match parse_integer(&value).and_then(to_json_number) {
            Some(n) if n.is_i64() || n.is_u64() => LeafOutcome::pass(Value::Number(n)),
            _ => self.reject(value, "'%name%' should be an integer.", &MessageParams::new(ctx.label)),
        }
    }
}

impl ToInt {
    /// Creates the rule with its default message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: RuleMessage::default_only(),
        }
    }
}

impl Default for ToInt {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a [`ToNumber`] rule.
#[must_use]
pub fn to_number() -> Rule {
    ToNumber::new().into()
}

/// Creates a [`ToInt`] rule.
#[must_use]
pub fn to_int() -> Rule {
    ToInt::new().into()
}
