//! String pattern validators
//!
//! Character-class checks, email shape and arbitrary regular expressions.
//! Non-string values pass through untouched.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::foundation::{LeafOutcome, MessageParams, Rule, RuleMessage, SchemaError, SchemaResult};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
    )
    .expect("email pattern is a valid regex")
});

// ============================================================================
// ALPHA / ALPHANUMERIC
// ============================================================================

/// Options of [`IsAlpha`] and [`IsAlphaNum`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AlphaConfig {
    /// Also accept whitespace.
    pub allow_spaces: bool,
}

impl AlphaConfig {
    /// Letters (and digits) only.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether whitespace is accepted.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_spaces(mut self, allow: bool) -> Self {
        self.allow_spaces = allow;
        self
    }
}

fn only_ascii(s: &str, digits: bool, spaces: bool) -> bool {
    s.chars().all(|c| {
        c.is_ascii_alphabetic() || (digits && c.is_ascii_digit()) || (spaces && c.is_whitespace())
    })
}

leaf_rule! {
    /// Validates that a string contains only ASCII letters.
    ///
    /// The empty string passes; pair with
    /// [`is_required`](crate::validators::is_required) to reject it.
    pub struct IsAlpha as "isAlpha" { config: AlphaConfig }
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        if matches!(&value, Value::String(s) if !only_ascii(s, false, self.config.allow_spaces)) {
            let params = MessageParams::new(ctx.label);
            return self.reject(value, "'%name%' should contain only alphabets.", &params);
        }
        LeafOutcome::pass(value)
    }
}

impl IsAlpha {
    /// Creates the rule.
    #[must_use]
    pub const fn new(config: AlphaConfig) -> Self {
        Self {
            config,
            message: RuleMessage::default_only(),
        }
    }
}

leaf_rule! {
    /// Validates that a string contains only ASCII letters and digits.
    pub struct IsAlphaNum as "isAlphaNum" { config: AlphaConfig }
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        if matches!(&value, Value::String(s) if !only_ascii(s, true, self.config.allow_spaces)) {
            let params = MessageParams::new(ctx.label);
            return self.reject(value, "'%name%' should contain only alphabets and numbers.", &params);
        }
        LeafOutcome::pass(value)
    }
}

impl IsAlphaNum {
    /// Creates the rule.
    #[must_use]
    pub const fn new(config: AlphaConfig) -> Self {
        Self {
            config,
            message: RuleMessage::default_only(),
        }
    }
}

/// Creates an [`IsAlpha`] rule.
#[must_use]
pub fn is_alpha(config: AlphaConfig) -> Rule {
    IsAlpha::new(config).into()
}

/// Creates an [`IsAlphaNum`] rule.
#[must_use]
pub fn is_alpha_num(config: AlphaConfig) -> Rule {
    IsAlphaNum::new(config).into()
}

// ============================================================================
// EMAIL
// ============================================================================

leaf_rule! {
    /// Validates email shape: a dotted or quoted local part, `@`, then a
    /// domain with a TLD of two letters or more, or a bracketed IPv4 address.
    pub struct IsEmail as "isEmail" {}
    placeholders(self) ["name"];
    validate(self, value, ctx) {
        if matches!(&value, Value::String(s) if !EMAIL_REGEX.is_match(s)) {
            return self.reject(value, "'%name%' should be a valid email.", &MessageParams::new(ctx.label));
        }
        LeafOutcome::pass(value)
    }
}

impl IsEmail {
    /// Creates the rule with its default message.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: RuleMessage::default_only(),
        }
    }
}

impl Default for IsEmail {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates an [`IsEmail`] rule.
#[must_use]
pub fn is_email() -> Rule {
    IsEmail::new().into()
}

// ============================================================================
// MATCH REGEX
// ============================================================================

leaf_rule! {
    /// Validates that a string matches a regular expression.
    ///
    /// The pattern is not anchored implicitly; use `^...$` for a full match.
    /// Its source is available to messages as `%regex%`.
    pub struct MatchRegex as "matchRegex" { regex: Regex }
    placeholders(self) ["name", "regex"];
    validate(self, value, ctx) {
        if matches!(&value, Value::String(s) if !self.regex.is_match(s)) {
            let params = MessageParams::new(ctx.label).with("regex", self.regex.as_str());
            return self.reject(value, "'%name%' should match the regex '%regex%'.", &params);
        }
        LeafOutcome::pass(value)
    }
}

impl MatchRegex {
    /// Compiles `pattern`.
    pub fn new(pattern: &str) -> SchemaResult<Self> {
        let regex = Regex::new(pattern).map_err(|source| SchemaError::InvalidRegex {
            rule: Self::NAME,
            source,
        })?;
        Ok(Self::from_regex(regex))
    }

    /// Uses an already compiled regex.
    #[must_use]
    pub fn from_regex(regex: Regex) -> Self {
        Self {
            regex,
            message: RuleMessage::default_only(),
        }
    }

    /// The pattern.
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Creates a [`MatchRegex`] rule from a pattern.
pub fn match_regex(pattern: &str) -> SchemaResult<Rule> {
    Ok(MatchRegex::new(pattern)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{LeafRule, RuleContext};
    use rstest::rstest;
    use serde_json::json;

    fn run(rule: &dyn LeafRule, value: Value) -> LeafOutcome {
        let path = crate::path!["field"];
        let ctx = RuleContext::new("field", &path).with_label("Field");
        rule.validate(value, &ctx)
    }

    #[rstest]
    #[case("abcXYZ", false, true)]
    #[case("", false, true)]
    #[case("abc def", false, false)]
    #[case("abc def", true, true)]
    #[case("abc1", false, false)]
    #[case("héllo", false, false)]
    fn alpha(#[case] input: &str, #[case] spaces: bool, #[case] ok: bool) {
        let rule = IsAlpha::new(AlphaConfig::new().allow_spaces(spaces));
        assert_eq!(run(&rule, json!(input)).is_ok(), ok);
    }

    #[rstest]
    #[case("abc123", false, true)]
    #[case("abc 123", false, false)]
    #[case("abc\t123", true, true)]
    #[case("abc-123", true, false)]
    fn alpha_num(#[case] input: &str, #[case] spaces: bool, #[case] ok: bool) {
        let rule = IsAlphaNum::new(AlphaConfig::new().allow_spaces(spaces));
        assert_eq!(run(&rule, json!(input)).is_ok(), ok);
    }

    #[test]
    fn alpha_messages() {
        let outcome = run(&IsAlpha::new(AlphaConfig::new()), json!("a1"));
        assert_eq!(outcome.error.as_deref(), Some("'Field' should contain only alphabets."));

        let outcome = run(&IsAlphaNum::new(AlphaConfig::new()), json!("a_1"));
        assert_eq!(
            outcome.error.as_deref(),
            Some("'Field' should contain only alphabets and numbers.")
        );
    }

    #[test]
    fn alpha_config_deserializes() {
        let config: AlphaConfig = serde_json::from_str(r#"{"allowSpaces": true}"#).unwrap();
        assert!(config.allow_spaces);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("first.last@sub.example.org", true)]
    #[case("\"quoted name\"@example.com", true)]
    #[case("user@[192.168.0.1]", true)]
    #[case("user@localhost", false)]
    #[case("user.example.com", false)]
    #[case("user@exa mple.com", false)]
    #[case("@example.com", false)]
    fn email(#[case] input: &str, #[case] ok: bool) {
        assert_eq!(run(&IsEmail::new(), json!(input)).is_ok(), ok);
    }

    #[test]
    fn email_ignores_non_strings() {
        assert!(run(&IsEmail::new(), json!(12)).is_ok());
        assert!(run(&IsEmail::new(), json!(null)).is_ok());
    }

    #[test]
    fn match_regex_reports_pattern() {
        let rule = MatchRegex::new(r"^\d{3}$").unwrap();
        assert!(run(&rule, json!("123")).is_ok());
        assert_eq!(
            run(&rule, json!("12a")).error.as_deref(),
            Some(r"'Field' should match the regex '^\d{3}$'.")
        );
    }

    #[test]
    fn invalid_regex_is_a_schema_error() {
        let err = MatchRegex::new("(unclosed").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidRegex { rule: "matchRegex", .. }));
    }
}
