//! Allowed-values check

use serde_json::Value;

use crate::foundation::{LeafOutcome, MessageParams, Rule, RuleMessage, SchemaError, SchemaResult};

/// The values an [`IsIn`] rule accepts: all strings or all numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Choices {
    /// String choices, compared exactly.
    Strings(Vec<String>),
    /// Numeric choices, compared by value (`1` equals `1.0`).
    Numbers(Vec<f64>),
}

impl Choices {
    /// String choices.
    pub fn strings<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Strings(choices.into_iter().map(Into::into).collect())
    }

    /// Numeric choices.
    pub fn numbers(choices: impl IntoIterator<Item = f64>) -> Self {
        Self::Numbers(choices.into_iter().collect())
    }

    /// Reads choices from JSON values, which must be all strings or all
    /// numbers.
    pub fn from_values(values: &[Value]) -> SchemaResult<Self> {
        let mismatch = || SchemaError::invalid_option(IsIn::NAME, "in", "should hold only strings or only numbers");
        match values.first() {
            None | Some(Value::String(_)) => values
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect::<Option<Vec<_>>>()
                .map(Self::Strings)
                .ok_or_else(mismatch),
            Some(Value::Number(_)) => values
                .iter()
                .map(Value::as_f64)
                .collect::<Option<Vec<_>>>()
                .map(Self::Numbers)
                .ok_or_else(mismatch),
            Some(_) => Err(mismatch()),
        }
    }

    /// Number of choices.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Strings(v) => v.len(),
            Self::Numbers(v) => v.len(),
        }
    }

    /// Returns true when there is no choice at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `value` is one of the choices. Strings never match
    /// numeric choices and vice versa.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Strings(choices), Value::String(s)) => choices.iter().any(|c| c == s),
            (Self::Numbers(choices), Value::Number(n)) => {
                n.as_f64().is_some_and(|n| choices.contains(&n))
            }
            _ => false,
        }
    }

    /// Choices joined with `", "`, as shown in messages.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::Strings(v) => v.join(", "),
            Self::Numbers(v) => v.iter().map(f64::to_string).collect::<Vec<_>>().join(", "),
        }
    }
}

leaf_rule! {
    /// Validates that a string or number is one of a fixed set.
    ///
    /// `null` passes; other value types always fail. The choice list is
    /// available to messages as `%in%`.
    pub struct IsIn as "isIn" { choices: Choices, joined: String }
    placeholders(self) ["name", "in"];
    validate(self, value, ctx) {
        if value.is_null() || self.choices.contains(&value) {
            return LeafOutcome::pass(value);
        }
        let params = MessageParams::new(ctx.label).with("in", self.joined.as_str());
        self.reject(value, "'%name%' should be one of '%in%'.", &params)
    }
}

impl IsIn {
    /// Creates the rule; an empty choice list is rejected.
    pub fn new(choices: Choices) -> SchemaResult<Self> {
        if choices.is_empty() {
            return Err(SchemaError::invalid_option(Self::NAME, "in", "should not be empty"));
        }
        Ok(Self {
            joined: choices.joined(),
            choices,
            message: RuleMessage::default_only(),
        })
    }

    /// The accepted values.
    #[must_use]
    pub fn choices(&self) -> &Choices {
        &self.choices
    }
}

/// Creates an [`IsIn`] rule.
pub fn is_in(choices: Choices) -> SchemaResult<Rule> {
    Ok(IsIn::new(choices)?.into())
}
