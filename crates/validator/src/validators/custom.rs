//! User-defined checks

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::foundation::{
    LeafOutcome, LeafRule, MessageParams, MessageTemplate, Rule, RuleContext, RuleMessage,
    SchemaResult,
};

type Check = dyn Fn(&Value, &RuleContext<'_>) -> Option<String> + Send + Sync;

/// A rule backed by a closure.
///
/// The closure returns `None` to accept the value or a message to reject it.
/// The message is itself a template rendered with `%name%`, unless a custom
/// message was set, which then takes precedence. The value is never changed.
///
/// The context exposes sibling fields through [`RuleContext::sibling`], so
/// cross-field checks fit here:
///
/// ```rust,ignore
/// let confirm = is_custom(|value, ctx| {
///     (Some(value) != ctx.sibling("password")).then(|| "'%name%' does not match.".to_owned())
/// });
/// ```
#[derive(Clone)]
pub struct IsCustom {
    check: Arc<Check>,
    message: RuleMessage,
}

impl IsCustom {
    /// Name reported in error records.
    pub const NAME: &'static str = "isCustom";

    /// Wraps `check`.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Value, &RuleContext<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            message: RuleMessage::default_only(),
        }
    }

    /// Replaces whatever the closure returns with `template`.
    pub fn with_message(mut self, template: &str) -> SchemaResult<Self> {
        self.message = RuleMessage::custom(Some(template), &["name"])?;
        Ok(self)
    }
}

impl fmt::Debug for IsCustom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsCustom")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl LeafRule for IsCustom {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, value: Value, ctx: &RuleContext<'_>) -> LeafOutcome {
        let Some(returned) = (self.check)(&value, ctx) else {
            return LeafOutcome::pass(value);
        };

        let params = MessageParams::new(ctx.label);
        let message = if self.message.is_custom() {
            self.message.render(&returned, &params)
        } else {
            match MessageTemplate::parse(returned.as_str()) {
                Ok(template) => template.render(&params),
                Err(_) => returned,
            }
        };
        LeafOutcome::fail(value, message)
    }
}

impl From<IsCustom> for Rule {
    fn from(rule: IsCustom) -> Self {
        Rule::leaf(rule)
    }
}

/// Creates an [`IsCustom`] rule.
pub fn is_custom<F>(check: F) -> Rule
where
    F: Fn(&Value, &RuleContext<'_>) -> Option<String> + Send + Sync + 'static,
{
    IsCustom::new(check).into()
}
