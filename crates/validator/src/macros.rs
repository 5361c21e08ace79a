//! Macros for declaring leaf rules with minimal boilerplate.
//!
//! # Available Macros
//!
//! - `leaf_rule!` - struct + message override + `LeafRule` impl + `Into<Rule>`
//! - [`path!`](crate::path) - build a [`Path`](crate::foundation::Path) from segments
//!
//! # Examples
//!
//! ```rust,ignore
//! leaf_rule! {
//!     /// Fails on `null` and empty strings.
//!     pub struct IsRequired as "isRequired" {}
//!     placeholders(self) ["name"];
//!     validate(self, value, ctx) {
//!         if value.is_null() {
//!             return self.reject(value, "'%name%' should not be empty.", &MessageParams::new(ctx.label));
//!         }
//!         LeafOutcome::pass(value)
//!     }
//! }
//! ```

// ============================================================================
// LEAF RULE MACRO
// ============================================================================

/// Declares a leaf rule.
///
/// Generates:
///
/// - the struct, with the listed (private) fields plus a `message` field
///   holding the compiled custom message, `#[derive(Debug, Clone)]`;
/// - `NAME`, the identifier reported in error records;
/// - `with_message`, compiling a custom template against the placeholder
///   list computed by the `placeholders` expression;
/// - a private `reject` helper rendering the custom message, or the given
///   default, into a failed [`LeafOutcome`](crate::foundation::LeafOutcome);
/// - the [`LeafRule`](crate::foundation::LeafRule) impl around the
///   `validate` block;
/// - `From<Self> for Rule`.
///
/// Constructors and factory functions are written by hand since their
/// fallibility differs per rule.
macro_rules! leaf_rule {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident as $rule_name:literal { $($field:ident: $fty:ty),* $(,)? }
        placeholders($ps:ident) $placeholders:expr;
        validate($self_:ident, $value:ident, $ctx:ident) $body:block
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        $vis struct $name {
            $($field: $fty,)*
            message: $crate::foundation::RuleMessage,
        }

        impl $name {
            /// Name reported in error records.
            pub const NAME: &'static str = $rule_name;

            /// Replaces the default messages with `template`.
            ///
            /// Fails when the template is malformed or uses a placeholder
            /// this rule does not provide.
            pub fn with_message(mut $ps, template: &str) -> $crate::foundation::SchemaResult<Self> {
                let available = $placeholders;
                $ps.message = $crate::foundation::RuleMessage::custom(Some(template), &available)?;
                Ok($ps)
            }

            #[allow(dead_code)]
            fn reject(
                &self,
                value: ::serde_json::Value,
                default: &str,
                params: &$crate::foundation::MessageParams<'_>,
            ) -> $crate::foundation::LeafOutcome {
                $crate::foundation::LeafOutcome::fail(value, self.message.render(default, params))
            }
        }

        impl $crate::foundation::LeafRule for $name {
            fn name(&self) -> &'static str {
                Self::NAME
            }

            #[allow(unused_variables)]
            fn validate(
                &$self_,
                $value: ::serde_json::Value,
                $ctx: &$crate::foundation::RuleContext<'_>,
            ) -> $crate::foundation::LeafOutcome $body
        }

        impl From<$name> for $crate::foundation::Rule {
            fn from(rule: $name) -> Self {
                $crate::foundation::Rule::leaf(rule)
            }
        }
    };
}

/// Placeholders of a rule configured with optional bounds: `name` plus the
/// bounds that are set.
pub(crate) fn bound_placeholders(
    min: bool,
    max: bool,
    eq: bool,
) -> smallvec::SmallVec<[&'static str; 4]> {
    let mut available = smallvec::smallvec!["name"];
    if min {
        available.push("min");
    }
    if max {
        available.push("max");
    }
    if eq {
        available.push("eq");
    }
    available
}
