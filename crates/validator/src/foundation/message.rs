//! Message templates for human-readable error text.
//!
//! Templates use a tiny substitution grammar:
//!
//! - `%key%` is replaced by the value of `key`
//! - `-%` produces a literal `%`
//! - any other `-` is kept as is
//!
//! Escapes are never part of a key: `-%` and `-` are written to the output
//! even between the delimiters of an open placeholder, ahead of its value.
//!
//! An odd number of `%` delimiters is an error, as is a placeholder with no
//! value to substitute.
//!
//! # Examples
//!
//! ```rust,ignore
//! use formguard_validator::foundation::message::{format, MessageParams};
//!
//! let params = MessageParams::new("Age").with("min", "18");
//! let text = format("'%name%' should not be less than %min%.", &params)?;
//! assert_eq!(text, "'Age' should not be less than 18.");
//!
//! assert_eq!(format("90-%", &MessageParams::empty())?, "90%");
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use smallvec::SmallVec;

// ============================================================================
// ERRORS
// ============================================================================

/// Failure to parse or render a message template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// The template has an opening `%` with no closing `%`.
    #[error("invalid pairs of `%` in template `{template}`")]
    UnterminatedPlaceholder {
        /// The offending template.
        template: String,
    },

    /// A placeholder has no value in the substitution map.
    #[error("value of `{key}` is not present")]
    MissingValue {
        /// The placeholder name.
        key: String,
    },

    /// A placeholder names a parameter the rule does not provide.
    #[error("template `{template}` uses unknown placeholder `{key}` (available: {available})")]
    UnknownPlaceholder {
        /// The offending template.
        template: String,
        /// The placeholder name.
        key: String,
        /// Comma separated list of the placeholders the rule provides.
        available: String,
    },
}

// ============================================================================
// PARAMETER LOOKUP
// ============================================================================

/// Source of placeholder values.
pub trait ParamLookup {
    /// Returns the value substituted for `%key%`.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<K, V, S> ParamLookup for HashMap<K, V, S>
where
    K: std::borrow::Borrow<str> + std::hash::Hash + Eq,
    V: AsRef<str>,
    S: std::hash::BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V> ParamLookup for BTreeMap<K, V>
where
    K: std::borrow::Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> ParamLookup for [(K, V)] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> ParamLookup for [(K, V); N] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.as_slice().lookup(key)
    }
}

/// Substitution values handed to a template by a rule.
///
/// Always carries `name` (the field label); rules add their own
/// parameters (`min`, `max`, `eq`, `in`, `regex`).
#[derive(Debug, Clone, Default)]
pub struct MessageParams<'a> {
    entries: SmallVec<[(&'static str, Cow<'a, str>); 4]>,
}

impl<'a> MessageParams<'a> {
    /// Parameters with only `name` set.
    #[must_use]
    pub fn new(name: &'a str) -> Self {
        Self::empty().with("name", name)
    }

    /// No parameters at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Adds (or replaces) a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, key: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Adds a parameter only when `value` is present.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_opt<T: fmt::Display>(self, key: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(key, value.to_string()),
            None => self,
        }
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl ParamLookup for MessageParams<'_> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}

// ============================================================================
// TEMPLATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed message template.
///
/// Rules parse their templates once at construction time so that a
/// malformed custom message is reported as a schema error instead of
/// surfacing during validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parses a template without restricting its placeholders.
    pub fn parse(template: impl Into<String>) -> Result<Self, FormatError> {
        let source = template.into();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut key = String::new();
        let mut in_key = false;
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '-' => {
                    if chars.next_if_eq(&'%').is_some() {
                        literal.push('%');
                    } else {
                        literal.push('-');
                    }
                }
                '%' if in_key => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(std::mem::take(&mut key)));
                    in_key = false;
                }
                '%' => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    in_key = true;
                }
                c if in_key => key.push(c),
                c => literal.push(c),
            }
        }

        if in_key {
            return Err(FormatError::UnterminatedPlaceholder { template: source });
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { source, segments })
    }

    /// Parses a template and checks every placeholder is one of `available`.
    pub fn compile(template: impl Into<String>, available: &[&str]) -> Result<Self, FormatError> {
        let parsed = Self::parse(template)?;
        if let Some(unknown) = parsed.placeholders().find(|k| !available.contains(k)) {
            return Err(FormatError::UnknownPlaceholder {
                template: parsed.source.clone(),
                key: unknown.to_owned(),
                available: available.join(", "),
            });
        }
        Ok(parsed)
    }

    /// The template text as written.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(key) => Some(key.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Renders the template, failing on a placeholder without a value.
    pub fn try_render<P: ParamLookup + ?Sized>(&self, params: &P) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => {
                    let value = params
                        .lookup(key)
                        .ok_or_else(|| FormatError::MissingValue { key: key.clone() })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }

    /// Renders the template.
    ///
    /// Placeholders were checked at compile time; one without a value is
    /// written back verbatim as `%key%`.
    #[must_use]
    pub fn render<P: ParamLookup + ?Sized>(&self, params: &P) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(key) => match params.lookup(key) {
                    Some(value) => out.push_str(value),
                    None => {
                        out.push('%');
                        out.push_str(key);
                        out.push('%');
                    }
                },
            }
        }
        out
    }
}

impl fmt::Display for MessageTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Formats `template` with `values` in one step.
pub fn format<P: ParamLookup + ?Sized>(template: &str, values: &P) -> Result<String, FormatError> {
    MessageTemplate::parse(template)?.try_render(values)
}

// ============================================================================
// RULE MESSAGES
// ============================================================================

/// A rule's message: its built-in default or a user supplied override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMessage {
    custom: Option<MessageTemplate>,
}

impl RuleMessage {
    /// Uses the rule's default messages.
    #[must_use]
    pub const fn default_only() -> Self {
        Self { custom: None }
    }

    /// Compiles an optional custom template against the rule's placeholders.
    pub fn custom(
        template: Option<&str>,
        available: &[&str],
    ) -> Result<Self, FormatError> {
        let custom = template
            .map(|t| MessageTemplate::compile(t, available))
            .transpose()?;
        Ok(Self { custom })
    }

    /// Returns true when a custom template overrides the defaults.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Renders the custom template if present, otherwise `default`.
    ///
    /// Defaults are crate-internal literals, so their placeholders always
    /// match the params the rule passes.
    #[must_use]
    pub fn render(&self, default: &str, params: &MessageParams<'_>) -> String {
        match &self.custom {
            Some(template) => template.render(params),
            None => match MessageTemplate::parse(default) {
                Ok(template) => template.render(params),
                Err(_) => default.to_owned(),
            },
        }
    }
}

impl Default for RuleMessage {
    fn default() -> Self {
        Self::default_only()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_placeholders() {
        let params = MessageParams::new("Age").with("min", "18");
        let text = format("'%name%' should not be less than %min%.", &params).unwrap();
        assert_eq!(text, "'Age' should not be less than 18.");
    }

    #[test]
    fn escaped_percent() {
        assert_eq!(format("90-%", &MessageParams::empty()).unwrap(), "90%");
        assert_eq!(
            format("%name% should be above 90-%.", &MessageParams::new("Marks")).unwrap(),
            "Marks should be above 90%."
        );
    }

    #[test]
    fn plain_dash_passes_through() {
        let params = MessageParams::new("Size").with("min", "1").with("max", "3");
        assert_eq!(
            format("'%name%' should have %min% - %max% elements.", &params).unwrap(),
            "'Size' should have 1 - 3 elements."
        );
        assert_eq!(format("a-b-", &MessageParams::empty()).unwrap(), "a-b-");
    }

    #[test]
    fn escapes_inside_a_placeholder_go_to_the_output() {
        let params = MessageParams::new("Ada");
        assert_eq!(format("%name-%%", &params).unwrap(), "%Ada");
        assert_eq!(format("%na-me%", &params).unwrap(), "-Ada");

        let t = MessageTemplate::parse("%na-me%").unwrap();
        assert_eq!(t.placeholders().collect::<Vec<_>>(), ["name"]);
    }

    #[test]
    fn unterminated_placeholder_is_an_error() {
        let err = format("%name is broken", &MessageParams::new("x")).unwrap_err();
        assert!(matches!(err, FormatError::UnterminatedPlaceholder { .. }));
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = format("%name% %min%", &MessageParams::new("x")).unwrap_err();
        assert_eq!(err, FormatError::MissingValue { key: "min".into() });
    }

    #[test]
    fn accepts_plain_maps() {
        let mut values = HashMap::new();
        values.insert("name", "Email");
        assert_eq!(
            format("%name% should not be empty.", &values).unwrap(),
            "Email should not be empty."
        );
        assert_eq!(
            format("%a%%b%", &[("a", "1"), ("b", "2")]).unwrap(),
            "12"
        );
    }

    #[test]
    fn compile_rejects_unknown_placeholders() {
        let err = MessageTemplate::compile("%name% > %max%", &["name", "min"]).unwrap_err();
        assert!(matches!(err, FormatError::UnknownPlaceholder { ref key, .. } if key == "max"));
    }

    #[test]
    fn placeholders_in_order() {
        let t = MessageTemplate::parse("%a% and %b% and %a%").unwrap();
        assert_eq!(t.placeholders().collect::<Vec<_>>(), ["a", "b", "a"]);
    }

    #[test]
    fn rule_message_prefers_custom() {
        let message = RuleMessage::custom(Some("%name% is bad"), &["name"]).unwrap();
        let params = MessageParams::new("Email");
        assert_eq!(message.render("'%name%' is invalid.", &params), "Email is bad");

        let default = RuleMessage::default_only();
        assert_eq!(default.render("'%name%' is invalid.", &params), "'Email' is invalid.");
    }
}
