//! ARRAY rule - length constraints plus a rule set applied to every element

use serde::Deserialize;
use serde_json::Value;

use crate::combinators::object::IsObject;
use crate::combinators::rule_set::RuleSet;
use crate::foundation::{
    ErrorDetail, ErrorTree, MessageParams, Rule, RuleContext, RuleMessage, RuleOutcome,
    SchemaError, SchemaResult, ValidationContext,
};
use crate::macros::bound_placeholders;
use crate::validator::Validator;

// ============================================================================
// CONFIG
// ============================================================================

/// Length constraints of an [`IsArray`] rule.
///
/// When several constraints are set they are checked in a fixed order, `eq`
/// first, then the `min`..`max` range, then `min`, then `max`, and only the
/// first violation is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArrayConfig {
    /// Minimum number of elements.
    pub min: Option<usize>,
    /// Maximum number of elements.
    pub max: Option<usize>,
    /// Exact number of elements.
    pub eq: Option<usize>,
}

impl ArrayConfig {
    /// No length constraint.
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

    fn check(&self) -> SchemaResult<()> {
        if let (Some(min), Some(max)) = (self.min, self.max)
            && min > max
        {
            return Err(SchemaError::invalid_option(
                IsArray::NAME,
                "min",
                format!("({min}) should not be greater than `max` ({max})"),
            ));
        }
        Ok(())
    }

    fn placeholders(&self) -> smallvec::SmallVec<[&'static str; 4]> {
        bound_placeholders(self.min.is_some(), self.max.is_some(), self.eq.is_some())
    }

    /// Default message of the first violated constraint, if any.
    fn violation(&self, len: usize) -> Option<&'static str> {
        if let Some(eq) = self.eq {
            return (len != eq).then_some("'%name%' should contain %eq% elements.");
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if len < min || len > max => {
                Some("'%name%' should have %min% - %max% elements.")
            }
            (Some(min), _) if len < min => Some("'%name%' should have at least %min% elements."),
            (_, Some(max)) if len > max => Some("'%name%' should have at most %max% elements."),
            _ => None,
        }
    }
}

// ============================================================================
// IS ARRAY
// ============================================================================

const NOT_AN_ARRAY: &str = "'%name%' should be an array.";

/// Checks that a value is an array, enforces its length and runs a rule set
/// on every element.
///
/// Elements are addressed by index, so an error on the third tag of field
/// `tags` has path `["tags", 2]`. The output array holds each element's
/// transformed value. Errors are keyed by the element index.
///
/// `null` and absent fields are not arrays and fail the type check.
///
/// When the enclosing rule set stops at its first failure, the element loop
/// does too: the output then holds the values collected before the failing
/// element followed by the untouched elements after it.
///
/// # Examples
///
/// ```rust,ignore
/// let tags = is_array(RuleSet::new([is_string(), to_lower_case()])?, ArrayConfig::new().max(5))?;
/// ```
#[derive(Debug, Clone)]
pub struct IsArray {
    rules: RuleSet,
    config: ArrayConfig,
    message: RuleMessage,
}

impl IsArray {
    /// Name reported in error records.
    pub const NAME: &'static str = "isArray";

    /// Creates the rule; `min > max` is rejected.
    pub fn new(rules: RuleSet, config: ArrayConfig) -> SchemaResult<Self> {
        config.check()?;
        Ok(Self {
            rules,
            config,
            message: RuleMessage::default_only(),
        })
    }

    /// Overrides every message of this rule.
    ///
    /// Available placeholders: `name` plus whichever of `min`, `max` and
    /// `eq` are configured.
    pub fn with_message(mut self, template: &str) -> SchemaResult<Self> {
        self.message = RuleMessage::custom(Some(template), &self.config.placeholders())?;
        Ok(self)
    }

    /// The element rule set.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// The length constraints.
    #[must_use]
    pub fn config(&self) -> &ArrayConfig {
        &self.config
    }

    fn fail(&self, value: Value, default: &str, ctx: &RuleContext<'_>) -> RuleOutcome {
        let params = MessageParams::new(ctx.label)
            .with_opt("min", self.config.min)
            .with_opt("max", self.config.max)
            .with_opt("eq", self.config.eq);
        RuleOutcome {
            value,
            error: Some(ErrorDetail::Message(self.message.render(default, &params))),
        }
    }

    pub(crate) fn validate(&self, value: Value, ctx: &RuleContext<'_>) -> RuleOutcome {
        let items = match value {
            Value::Array(items) => items,
            other => return self.fail(other, NOT_AN_ARRAY, ctx),
        };

        if let Some(default) = self.config.violation(items.len()) {
            return self.fail(Value::Array(items), default, ctx);
        }

        let mut out = Vec::with_capacity(items.len());
        let mut errors = ErrorTree::new();
        let mut rest = items.into_iter().enumerate();

        while let Some((index, item)) = rest.next() {
            let path = ctx.path.child(index);
            let elem_ctx = ValidationContext::new(&path)
                .as_array_elem()
                .with_return_early(ctx.return_early)
                .with_show_nested_error(ctx.show_nested_error)
                .with_all_values(ctx.all_values);

            let outcome = self.rules.validate(item, ctx.key, &elem_ctx);
            match outcome.errors {
                Some(list) => {
                    errors.insert(index.to_string(), list);
                    if ctx.return_early {
                        tracing::trace!(path = %path, "array element failed, skipping the rest");
                        out.extend(rest.map(|(_, item)| item));
                        break;
                    }
                    out.push(outcome.value);
                }
                None => out.push(outcome.value),
            }
        }

        RuleOutcome {
            value: Value::Array(out),
            error: errors.into_option().map(ErrorDetail::Nested),
        }
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// Creates an [`IsArray`] rule applying `rules` to every element.
pub fn is_array(rules: impl Into<RuleSet>, config: ArrayConfig) -> SchemaResult<Rule> {
    Ok(IsArray::new(rules.into(), config)?.into())
}

/// Creates an [`IsArray`] rule whose elements must be objects matching
/// `schema`.
pub fn is_array_of_object(schema: Validator, config: ArrayConfig) -> SchemaResult<Rule> {
    is_array(Rule::from(IsObject::new(schema)), config)
}
