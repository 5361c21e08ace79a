//! Built-in leaf rules
//!
//! Ready-to-use checks and conversions for form-like input.
//!
//! # Categories
//!
//! - **Presence**: [`is_required`]
//! - **String**: [`is_string`], [`is_len`], [`is_alpha`], [`is_alpha_num`],
//!   [`is_email`], [`match_regex`], [`to_lower_case`], [`to_upper_case`]
//! - **Numeric**: [`is_number`], [`is_int`], [`to_number`], [`to_int`]
//! - **Membership**: [`is_in`]
//! - **Custom**: [`is_custom`]
//!
//! Except for [`is_required`] and the explicit type checks, a rule lets
//! values of types it does not apply to pass untouched, so an `is_len` on a
//! number never fails.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::prelude::*;
//!
//! let username = RuleSet::new([
//!     is_required(),
//!     is_string(),
//!     to_lower_case(),
//!     is_len(LenConfig::new().min(3).max(20))?,
//!     is_alpha_num(AlphaConfig::new()),
//! ])?;
//!
//! let age = RuleSet::new([to_int(), is_int(RangeConfig::new().min(18.0))?])?;
//! ```

pub mod custom;
pub mod length;
pub mod membership;
pub mod numeric;
pub mod pattern;
pub mod required;
pub mod string;

pub use custom::{IsCustom, is_custom};
pub use length::{IsLen, LenConfig, is_len};
pub use membership::{Choices, IsIn, is_in};
pub use numeric::{
    IsInt, IsNumber, RangeConfig, ToInt, ToNumber, is_int, is_number, parse_integer,
    parse_number, to_int, to_number,
};
pub use pattern::{
    AlphaConfig, IsAlpha, IsAlphaNum, IsEmail, MatchRegex, is_alpha, is_alpha_num, is_email,
    match_regex,
};
pub use required::{IsRequired, is_required};
pub use string::{Case, ChangeCase, IsString, is_string, to_lower_case, to_upper_case};
