//! Rule sets and structural rules
//!
//! - [`RuleSet`]: the ordered pipeline of one field
//! - [`IsObject`]: recurse into a nested object with its own [`Validator`](crate::Validator)
//! - [`IsArray`]: check an array's length and run a rule set on each element

pub mod array;
pub mod object;
pub mod rule_set;

pub use array::{ArrayConfig, IsArray, is_array, is_array_of_object};
pub use object::{IsObject, is_object, is_object_with};
pub use rule_set::{RuleSet, RuleSetOutcome};
