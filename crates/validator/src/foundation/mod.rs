//! Core validation types and traits
//!
//! This module contains the building blocks every other module is made of:
//!
//! - **Rules**: [`LeafRule`], [`Rule`], [`LeafOutcome`], [`RuleOutcome`]
//! - **Contexts**: [`ValidationContext`], [`RuleContext`]
//! - **Paths**: [`Path`], [`PathSegment`]
//! - **Errors**: [`FieldError`], [`ErrorTree`], [`SchemaError`]
//! - **Messages**: [`MessageTemplate`], [`MessageParams`], [`format`]
//!
//! # Architecture
//!
//! ## 1. Values in, values out
//!
//! Rules take a `serde_json::Value` by value and hand back a value, so a rule
//! set is a pipeline: conversions made by one rule are what the next rule
//! sees.
//!
//! ## 2. Failures are data
//!
//! Validation never returns `Err`. A failed rule produces a [`FieldError`]
//! recording the message, the rule name, the value and its [`Path`]. Only
//! building a schema can fail, with a [`SchemaError`].
//!
//! ## 3. Structure is explicit
//!
//! Nested objects and arrays are handled by dedicated [`Rule`] variants, not
//! by inspecting what a rule returned.

pub mod context;
pub mod error;
pub mod message;
pub mod path;
pub mod rule;

pub use context::{RuleContext, ValidationContext};
pub use error::{ErrorDetail, ErrorTree, FieldError, SchemaError, SchemaResult};
pub use message::{FormatError, MessageParams, MessageTemplate, ParamLookup, RuleMessage, format};
pub use path::{Path, PathSegment};
pub use rule::{LeafOutcome, LeafRule, Rule, RuleOutcome};

/// Common imports for writing rules.
pub mod prelude {
    pub use super::{
        ErrorDetail, ErrorTree, FieldError, LeafOutcome, LeafRule, MessageParams, Path,
        PathSegment, Rule, RuleContext, RuleMessage, RuleOutcome, SchemaError, SchemaResult,
        ValidationContext,
    };
}

/// Short name of a JSON value's type, as used in type-mismatch messages.
#[must_use]
pub fn type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!(1.5)), "number");
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!({})), "object");
    }
}
