//! OBJECT rule - validates a nested object against its own schema

use serde_json::Value;

use crate::foundation::{
    ErrorDetail, MessageParams, Rule, RuleContext, RuleMessage, RuleOutcome, SchemaResult,
};
use crate::options::ValidateOptions;
use crate::validator::Validator;

const NOT_AN_OBJECT: &str = "'%name%' should be an object.";

/// Checks that a value is an object and validates it with a nested
/// [`Validator`].
///
/// The nested validator runs at the path of the current field, so errors of
/// its fields carry fully qualified paths such as `["user", "address",
/// "city"]`. Its output object replaces the field's value. When it fails,
/// the whole nested [`ErrorTree`](crate::foundation::ErrorTree) is the
/// rule's error; the owning rule set flattens it unless nested errors are
/// shown.
///
/// `null` and absent fields are not objects and fail the type check.
///
/// # Examples
///
/// ```rust,ignore
/// let address = Validator::builder().field("city", [is_string()]).build()?;
/// let user = Validator::builder().field("address", is_object(address)).build()?;
/// ```
#[derive(Debug, Clone)]
pub struct IsObject {
    schema: Validator,
    message: RuleMessage,
}

impl IsObject {
    /// Name reported in error records.
    pub const NAME: &'static str = "isObject";

    /// Wraps `schema`.
    #[must_use]
    pub fn new(schema: Validator) -> Self {
        Self {
            schema,
            message: RuleMessage::default_only(),
        }
    }

    /// Overrides the type-mismatch message. Available placeholder: `name`.
    pub fn with_message(mut self, template: &str) -> SchemaResult<Self> {
        self.message = RuleMessage::custom(Some(template), &["name"])?;
        Ok(self)
    }

    /// The nested schema.
    #[must_use]
    pub fn schema(&self) -> &Validator {
        &self.schema
    }

    pub(crate) fn validate(&self, value: Value, ctx: &RuleContext<'_>) -> RuleOutcome {
        match value {
            Value::Object(map) => {
                // The nested validator's own flags take precedence over these.
                let options = ValidateOptions::new()
                    .at(ctx.path.clone())
                    .show_nested_error(ctx.show_nested_error)
                    .return_rule_set_early(ctx.return_early);
                let outcome = self.schema.validate(&map, &options);

                RuleOutcome {
                    value: Value::Object(outcome.values),
                    error: outcome.errors.map(ErrorDetail::Nested),
                }
            }
            other => {
                let message = self
                    .message
                    .render(NOT_AN_OBJECT, &MessageParams::new(ctx.label));
                RuleOutcome {
                    value: other,
                    error: Some(ErrorDetail::Message(message)),
                }
            }
        }
    }
}

/// Creates an [`IsObject`] rule for `schema`.
#[must_use]
pub fn is_object(schema: Validator) -> Rule {
    IsObject::new(schema).into()
}

/// Creates an [`IsObject`] rule with a custom type-mismatch message.
pub fn is_object_with(schema: Validator, message: &str) -> SchemaResult<Rule> {
    Ok(IsObject::new(schema).with_message(message)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Path;
    use crate::validators::{is_string, to_upper_case};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn address() -> Validator {
        Validator::builder()
            .field("city", vec![is_string(), to_upper_case()])
            .build()
            .unwrap()
    }

    #[test]
    fn rejects_non_objects() {
        let rule = IsObject::new(address());
        let path = crate::path!["address"];
        let ctx = RuleContext::new("address", &path).with_label("Address");

        let outcome = rule.validate(json!("Main street"), &ctx);
        assert_eq!(outcome.value, json!("Main street"));
        assert_eq!(
            outcome.error,
            Some(ErrorDetail::Message("'Address' should be an object.".into()))
        );
    }

    #[test]
    fn null_is_not_an_object() {
        let rule = IsObject::new(address());
        let path = crate::path!["address"];
        let ctx = RuleContext::new("address", &path);

        let outcome = rule.validate(Value::Null, &ctx);
        assert_eq!(outcome.value, Value::Null);
        assert_eq!(
            outcome.error,
            Some(ErrorDetail::Message("'address' should be an object.".into()))
        );
    }

    #[test]
    fn returns_transformed_object() {
        let rule = IsObject::new(address());
        let path = crate::path!["address"];
        let ctx = RuleContext::new("address", &path);

        let outcome = rule.validate(json!({"city": "paris"}), &ctx);
        assert!(outcome.is_ok());
        assert_eq!(outcome.value, json!({"city": "PARIS"}));
    }

    #[test]
    fn nested_errors_carry_full_paths() {
        let rule = IsObject::new(address());
        let path = crate::path!["user", "address"];
        let ctx = RuleContext::new("address", &path);

        let outcome = rule.validate(json!({"city": 42}), &ctx);
        let tree = outcome.error.as_ref().and_then(ErrorDetail::as_nested).unwrap();
        let city = tree.get("city").unwrap();

        assert_eq!(city.len(), 1);
        assert_eq!(city[0].validator, "isString");
        assert_eq!(city[0].path, crate::path!["user", "address", "city"]);
    }

    #[test]
    fn custom_message() {
        let rule = IsObject::new(address())
            .with_message("%name% must be a map")
            .unwrap();
        let path = Path::root().child("address");
        let ctx = RuleContext::new("address", &path);

        let outcome = rule.validate(json!(1), &ctx);
        assert_eq!(outcome.error.unwrap().to_string(), "address must be a map");
    }

    #[test]
    fn custom_message_with_unknown_placeholder_is_rejected() {
        assert!(IsObject::new(address()).with_message("%min%").is_err());
    }
}
