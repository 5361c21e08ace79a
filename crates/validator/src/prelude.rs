//! Prelude module for convenient imports.
//!
//! Provides a single `use formguard_validator::prelude::*;` import that
//! brings in the validator, rule sets, every built-in rule and the types
//! needed to read results.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let login = Validator::builder()
//!     .field("email", [is_required(), is_email()])
//!     .field("password", [is_required(), is_len(LenConfig::new().min(8))?])
//!     .build()?;
//! ```

// ============================================================================
// FOUNDATION: Rules, contexts, errors, messages
// ============================================================================

pub use crate::foundation::{
    ErrorDetail, ErrorTree, FieldError, FormatError, LeafOutcome, LeafRule, MessageParams, Path,
    PathSegment, Rule, RuleContext, RuleOutcome, SchemaError, SchemaResult, format,
};

// ============================================================================
// VALIDATOR: Schema, options, outcome
// ============================================================================

pub use crate::options::{ValidateOptions, ValidatorOptions};
pub use crate::validator::{FieldSpec, ValidationOutcome, Validator, ValidatorBuilder};

// ============================================================================
// COMBINATORS: Rule sets and structural rules
// ============================================================================

pub use crate::combinators::{
    ArrayConfig, IsArray, IsObject, RuleSet, is_array, is_array_of_object, is_object,
    is_object_with,
};

// ============================================================================
// VALIDATORS: All built-in leaf rules
// ============================================================================

pub use crate::validators::{
    AlphaConfig, Choices, LenConfig, RangeConfig, is_alpha, is_alpha_num, is_custom, is_email,
    is_in, is_int, is_len, is_number, is_required, is_string, match_regex, to_int,
    to_lower_case, to_number, to_upper_case,
};
