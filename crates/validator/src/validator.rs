//! The object validator
//!
//! A [`Validator`] maps field names to [`RuleSet`]s. Validating an object
//! runs every rule set in declaration order and gathers the transformed
//! values and the errors of every failing field.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let signup = Validator::builder()
//!     .field("email", [is_required(), is_string(), to_lower_case(), is_email()])
//!     .field("age", FieldSpec::labeled([to_int(), is_int(RangeConfig::new().min(18.0))?], "Age"))
//!     .return_early(true)
//!     .build()?;
//!
//! let input = json!({"email": "Me@Example.COM", "age": "21"});
//! let outcome = signup.validate_value(&input, &ValidateOptions::new())?;
//! assert!(outcome.is_valid());
//! assert_eq!(outcome.values["email"], "me@example.com");
//! assert_eq!(outcome.values["age"], 21);
//! ```

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde_json::{Map, Value};

use crate::combinators::RuleSet;
use crate::foundation::{ErrorTree, Rule, SchemaError, SchemaResult, ValidationContext, type_name};
use crate::options::{Policy, ValidateOptions, ValidatorOptions};

// ============================================================================
// FIELD SPEC
// ============================================================================

/// How a field's rules are declared.
///
/// Anything convertible into a `FieldSpec` can be handed to
/// [`ValidatorBuilder::field`]: a single [`Rule`], a list of rules, a ready
/// [`RuleSet`], or a list with a display label.
#[derive(Debug, Clone)]
pub enum FieldSpec {
    /// A prepared rule set.
    RuleSet(RuleSet),
    /// A single rule.
    Rule(Rule),
    /// Rules in execution order.
    Rules(Vec<Rule>),
    /// Rules plus the label used as `%name%` in messages.
    Labeled {
        /// Rules in execution order.
        rules: Vec<Rule>,
        /// Display label.
        label: String,
    },
}

impl FieldSpec {
    /// Rules with a display label.
    pub fn labeled(rules: impl IntoIterator<Item = Rule>, label: impl Into<String>) -> Self {
        Self::Labeled {
            rules: rules.into_iter().collect(),
            label: label.into(),
        }
    }

    fn into_rule_set(self, field: &str) -> SchemaResult<RuleSet> {
        let empty = || SchemaError::EmptyRuleSet {
            field: field.to_owned(),
        };
        match self {
            Self::RuleSet(set) => Ok(set),
            Self::Rule(rule) => Ok(RuleSet::single(rule)),
            Self::Rules(rules) => RuleSet::new(rules).map_err(|_| empty()),
            Self::Labeled { rules, label } => RuleSet::labeled(rules, label).map_err(|_| empty()),
        }
    }
}

impl From<RuleSet> for FieldSpec {
    fn from(set: RuleSet) -> Self {
        Self::RuleSet(set)
    }
}

impl From<Rule> for FieldSpec {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

impl From<Vec<Rule>> for FieldSpec {
    fn from(rules: Vec<Rule>) -> Self {
        Self::Rules(rules)
    }
}

impl<const N: usize> From<[Rule; N]> for FieldSpec {
    fn from(rules: [Rule; N]) -> Self {
        Self::Rules(rules.into())
    }
}

// ============================================================================
// OUTCOME
// ============================================================================

/// Output of [`Validator::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    /// Transformed values of the declared fields, in declaration order.
    ///
    /// A field that was absent from the input and is still `null` after its
    /// rules ran is left out, as is every field after the first failing one
    /// when validation stopped early.
    pub values: Map<String, Value>,
    /// Errors per field; `None` when every field passed.
    pub errors: Option<ErrorTree>,
}

impl ValidationOutcome {
    /// Returns true if no field failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_none()
    }

    /// The transformed values, or the errors.
    pub fn into_result(self) -> Result<Map<String, Value>, ErrorTree> {
        match self.errors {
            None => Ok(self.values),
            Some(errors) => Err(errors),
        }
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

/// Validates objects against a declared field schema.
///
/// Built once, then used for any number of calls; `validate` takes `&self`
/// and the validator is `Send + Sync`, so it can be shared between threads.
#[derive(Debug, Clone)]
pub struct Validator {
    fields: IndexMap<String, RuleSet>,
    options: ValidatorOptions,
}

impl Validator {
    /// Creates a validator from `(field, rules)` pairs.
    ///
    /// Fails on an empty rule list or a field declared twice.
    pub fn new<I, K, S>(schema: I, options: ValidatorOptions) -> SchemaResult<Self>
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<FieldSpec>,
    {
        let mut fields = IndexMap::new();
        for (key, spec) in schema {
            let key = key.into();
            let set = spec.into().into_rule_set(&key)?;
            match fields.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(SchemaError::DuplicateField(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    entry.insert(set);
                }
            }
        }
        Ok(Self { fields, options })
    }

    /// Starts a builder.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Constructor-time options.
    #[must_use]
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Declared fields in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The rule set of `field`.
    #[must_use]
    pub fn rule_set(&self, field: &str) -> Option<&RuleSet> {
        self.fields.get(field)
    }

    /// Validates `values`.
    ///
    /// Fields are processed in declaration order. Input keys without a
    /// declared field are ignored and do not appear in the output.
    pub fn validate(&self, values: &Map<String, Value>, options: &ValidateOptions) -> ValidationOutcome {
        let policy = Policy::resolve(&self.options, options);
        let ctx = ValidationContext::new(&options.path)
            .with_return_early(policy.return_rule_set_early)
            .with_show_nested_error(policy.show_nested_error)
            .with_all_values(Some(values));

        let mut out = Map::new();
        let mut errors = ErrorTree::new();

        for (key, rule_set) in &self.fields {
            let input = values.get(key);
            let absent = input.is_none();
            let outcome = rule_set.validate(input.cloned().unwrap_or(Value::Null), key, &ctx);

            if !(absent && outcome.value.is_null()) {
                out.insert(key.clone(), outcome.value);
            }

            if let Some(list) = outcome.errors {
                errors.insert(key.clone(), list);
                if policy.return_early {
                    tracing::trace!(field = %key, "stopping after first failing field");
                    break;
                }
            }
        }

        tracing::debug!(
            path = %options.path,
            fields = self.fields.len(),
            failed = errors.len(),
            return_early = policy.return_early,
            return_rule_set_early = policy.return_rule_set_early,
            show_nested_error = policy.show_nested_error,
            "validated object"
        );

        ValidationOutcome {
            values: out,
            errors: errors.into_option(),
        }
    }

    /// Validates an arbitrary JSON value, which must be an object.
    pub fn validate_value(&self, value: &Value, options: &ValidateOptions) -> SchemaResult<ValidationOutcome> {
        match value {
            Value::Object(map) => Ok(self.validate(map, options)),
            other => Err(SchemaError::NotAnObject(type_name(other))),
        }
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builder for [`Validator`].
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    fields: Vec<(String, FieldSpec)>,
    options: ValidatorOptions,
}

impl ValidatorBuilder {
    /// Declares a field.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, key: impl Into<String>, spec: impl Into<FieldSpec>) -> Self {
        self.fields.push((key.into(), spec.into()));
        self
    }

    /// Replaces all constructor-time options.
    #[must_use = "builder methods must be chained or built"]
    pub fn options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Fixes `return_early` for every call.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_early(mut self, value: bool) -> Self {
        self.options = self.options.return_early(value);
        self
    }

    /// Fixes `return_rule_set_early` for every call.
    #[must_use = "builder methods must be chained or built"]
    pub fn return_rule_set_early(mut self, value: bool) -> Self {
        self.options = self.options.return_rule_set_early(value);
        self
    }

    /// Fixes `show_nested_error` for every call.
    #[must_use = "builder methods must be chained or built"]
    pub fn show_nested_error(mut self, value: bool) -> Self {
        self.options = self.options.show_nested_error(value);
        self
    }

    /// Builds the validator.
    pub fn build(self) -> SchemaResult<Validator> {
        Validator::new(self.fields, self.options)
    }
}
