//! RULE SET - the ordered rule pipeline of one field

use serde_json::Value;

use crate::foundation::{
    ErrorDetail, FieldError, Rule, RuleContext, RuleOutcome, SchemaError, SchemaResult,
    ValidationContext,
};

// ============================================================================
// RULE SET
// ============================================================================

/// Ordered, non-empty list of rules applied to one field.
///
/// Each rule receives the value returned by the previous one, so conversions
/// accumulate even when an earlier rule already failed. Every rule runs
/// unless the context asks to stop at the first failure.
///
/// # Examples
///
/// ```rust,ignore
/// use formguard_validator::prelude::*;
///
/// let username = RuleSet::new([is_string(), to_lower_case(), is_len(LenConfig::new().min(3))?])?
///     .with_label("Username");
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    label: Option<String>,
}

/// Output of [`RuleSet::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetOutcome {
    /// The value after the last rule that ran.
    pub value: Value,
    /// Errors in rule order; `None` when every rule passed.
    pub errors: Option<Vec<FieldError>>,
}

impl RuleSet {
    /// Creates a rule set; an empty list is rejected.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> SchemaResult<Self> {
        let rules: Vec<Rule> = rules.into_iter().collect();
        if rules.is_empty() {
            return Err(SchemaError::EmptyRuleSet {
                field: "<anonymous>".to_owned(),
            });
        }
        Ok(Self { rules, label: None })
    }

    /// Creates a rule set with a display label.
    pub fn labeled(
        rules: impl IntoIterator<Item = Rule>,
        label: impl Into<String>,
    ) -> SchemaResult<Self> {
        Ok(Self::new(rules)?.with_label(label))
    }

    /// A rule set holding exactly one rule.
    #[must_use]
    pub fn single(rule: Rule) -> Self {
        Self {
            rules: vec![rule],
            label: None,
        }
    }

    /// Sets the label used as `%name%` instead of the field key.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The rules, in execution order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// The display label, if one was set.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Runs the pipeline on `value`, the content of field `key`.
    ///
    /// Errors of structural rules are spliced into this field's list unless
    /// `ctx.show_nested_error` is set, in which case the nested tree is kept
    /// as a single error record.
    pub fn validate(&self, value: Value, key: &str, ctx: &ValidationContext<'_>) -> RuleSetOutcome {
        let path = ctx.field_path(key);
        let rule_ctx = RuleContext {
            key,
            label: self.label.as_deref().unwrap_or(key),
            path: &path,
            show_nested_error: ctx.show_nested_error,
            return_early: ctx.return_early,
            all_values: ctx.all_values,
        };

        let mut value = value;
        let mut errors = Vec::new();

        for rule in &self.rules {
            let RuleOutcome { value: next, error } = rule.validate(value, &rule_ctx);
            value = next;

            let Some(error) = error else {
                continue;
            };

            tracing::trace!(rule = rule.name(), path = %path, "rule failed");

            match error {
                ErrorDetail::Nested(tree) if !ctx.show_nested_error => {
                    errors.extend(tree.into_flat());
                }
                error => errors.push(FieldError {
                    error,
                    validator: rule.name(),
                    value: value.clone(),
                    path: path.clone(),
                }),
            }

            if ctx.return_early {
                break;
            }
        }

        RuleSetOutcome {
            value,
            errors: if errors.is_empty() { None } else { Some(errors) },
        }
    }
}

impl From<Rule> for RuleSet {
    fn from(rule: Rule) -> Self {
        Self::single(rule)
    }
}
