//! The rule abstraction.
//!
//! A rule inspects one value, may transform it and may report an error. Leaf
//! rules ([`LeafRule`]) only ever report a message. Structural rules
//! ([`IsObject`], [`IsArray`]) recurse into a nested schema and may report a
//! whole [`ErrorTree`](crate::foundation::ErrorTree). [`Rule`] keeps the two
//! apart at the type level so rule sets never have to inspect error shapes.
//!
//! # Writing a leaf rule
//!
//! ```rust,ignore
//! use formguard_validator::foundation::{LeafOutcome, LeafRule, Rule, RuleContext};
//! use serde_json::Value;
//!
//! #[derive(Debug)]
//! struct Trim;
//!
//! impl LeafRule for Trim {
//!     fn name(&self) -> &'static str { "trim" }
//!
//!     fn validate(&self, value: Value, _ctx: &RuleContext<'_>) -> LeafOutcome {
//!         match value {
//!             Value::String(s) => LeafOutcome::pass(Value::String(s.trim().to_owned())),
//!             other => LeafOutcome::pass(other),
//!         }
//!     }
//! }
//!
//! let rule = Rule::leaf(Trim);
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::combinators::{IsArray, IsObject};
use crate::foundation::context::RuleContext;
use crate::foundation::error::ErrorDetail;

// ============================================================================
// OUTCOMES
// ============================================================================

/// Result of a leaf rule: the (possibly transformed) value and an optional
/// message.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafOutcome {
    /// Value handed to the next rule.
    pub value: Value,
    /// Rendered message when the check failed.
    pub error: Option<String>,
}

impl LeafOutcome {
    /// The value is acceptable.
    #[must_use]
    pub fn pass(value: Value) -> Self {
        Self { value, error: None }
    }

    /// The value is rejected with `message`.
    #[must_use]
    pub fn fail(value: Value, message: impl Into<String>) -> Self {
        Self {
            value,
            error: Some(message.into()),
        }
    }

    /// Returns true if the check passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of any rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    /// Value handed to the next rule.
    pub value: Value,
    /// Failure, if any.
    pub error: Option<ErrorDetail>,
}

impl RuleOutcome {
    /// The value is acceptable.
    #[must_use]
    pub fn pass(value: Value) -> Self {
        Self { value, error: None }
    }

    /// Returns true if the check passed.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<LeafOutcome> for RuleOutcome {
    fn from(outcome: LeafOutcome) -> Self {
        Self {
            value: outcome.value,
            error: outcome.error.map(ErrorDetail::Message),
        }
    }
}

// ============================================================================
// LEAF RULE
// ============================================================================

/// A rule without structural logic.
///
/// Implementations hold only immutable configuration and validate it when
/// they are constructed. `validate` must:
///
/// - always return a value, unchanged if nothing was converted;
/// - pass silently when the value's type is not one the rule applies to
///   (type gating is the job of explicit type-check rules).
pub trait LeafRule: fmt::Debug + Send + Sync {
    /// Stable identifier reported in error records.
    fn name(&self) -> &'static str;

    /// Checks (and possibly transforms) `value`.
    fn validate(&self, value: Value, ctx: &RuleContext<'_>) -> LeafOutcome;
}

// ============================================================================
// RULE
// ============================================================================

/// A rule as stored in a rule set.
///
/// Cloning is cheap; clones share the underlying rule, so one configured
/// rule can appear in several rule sets.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A leaf check or conversion.
    Leaf(Arc<dyn LeafRule>),
    /// Validates a nested object against its own schema.
    Object(Arc<IsObject>),
    /// Validates an array and each of its elements.
    Array(Arc<IsArray>),
}

impl Rule {
    /// Wraps a leaf rule.
    pub fn leaf<R: LeafRule + 'static>(rule: R) -> Self {
        Rule::Leaf(Arc::new(rule))
    }

    /// Stable identifier reported in error records.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Rule::Leaf(rule) => rule.name(),
            Rule::Object(_) => IsObject::NAME,
            Rule::Array(_) => IsArray::NAME,
        }
    }

    /// Returns true for [`Rule::Object`] and [`Rule::Array`].
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Rule::Leaf(_))
    }

    /// Runs the rule.
    pub fn validate(&self, value: Value, ctx: &RuleContext<'_>) -> RuleOutcome {
        match self {
            Rule::Leaf(rule) => rule.validate(value, ctx).into(),
            Rule::Object(rule) => rule.validate(value, ctx),
            Rule::Array(rule) => rule.validate(value, ctx),
        }
    }
}

impl From<IsObject> for Rule {
    fn from(rule: IsObject) -> Self {
        Rule::Object(Arc::new(rule))
    }
}

impl From<IsArray> for Rule {
    fn from(rule: IsArray) -> Self {
        Rule::Array(Arc::new(rule))
    }
}
