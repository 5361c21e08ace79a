//! # formguard-validator
//!
//! Declarative validation and normalization of JSON-like objects, typically
//! form submissions.
//!
//! A schema maps each field to an ordered list of rules. Rules check a value,
//! may transform it (trim, convert, change case) and report human readable
//! messages. Nested objects and arrays are validated recursively, and every
//! error records the full path of the offending value.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//! use serde_json::json;
//!
//! let address = Validator::builder()
//!     .field("city", [is_required(), is_string()])
//!     .build()?;
//!
//! let user = Validator::builder()
//!     .field("name", FieldSpec::labeled([is_required(), is_string(), to_upper_case()], "Name"))
//!     .field("address", is_object(address))
//!     .field("tags", is_array(RuleSet::new([is_string(), to_lower_case()])?, ArrayConfig::new().max(5))?)
//!     .build()?;
//!
//! let outcome = user.validate_value(
//!     &json!({"name": "ada", "address": {"city": 42}, "tags": ["Math"]}),
//!     &ValidateOptions::new(),
//! )?;
//!
//! assert_eq!(outcome.values["name"], "ADA");
//! let errors = outcome.errors.unwrap();
//! assert_eq!(errors.get("address").unwrap()[0].path.to_string(), "address.city");
//! ```
//!
//! ## Policies
//!
//! Three flags, described in [`options`], control early termination and
//! whether nested errors are flattened into their parent field.
//!
//! ## Messages
//!
//! Every rule has default messages and accepts a custom template using the
//! `%placeholder%` grammar of [`foundation::message`].
//!
//! ## Writing Rules
//!
//! Implement [`LeafRule`](foundation::LeafRule) and wrap it with
//! [`Rule::leaf`](foundation::Rule::leaf), or use
//! [`is_custom`](validators::is_custom) for a one-off closure.

#[macro_use]
mod macros;

pub mod combinators;
pub mod foundation;
pub mod options;
pub mod prelude;
pub mod validator;
pub mod validators;

pub use combinators::RuleSet;
pub use foundation::{ErrorTree, FieldError, Path, Rule, SchemaError, SchemaResult};
pub use options::{ValidateOptions, ValidatorOptions};
pub use validator::{FieldSpec, ValidationOutcome, Validator, ValidatorBuilder};
