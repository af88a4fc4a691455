//! Raw value model
//!
//! A raw value is one of:
//! - a literal (`#fff`, `10px`, `1px solid var(--border)`)
//! - a reference spanning the whole value (`var(--brand)`)
//! - several alternatives joined by `" | "`, each a literal or a reference
//!
//! Only a value that is *entirely* `var(--name)` counts as a reference. Mixed values
//! such as `1px solid var(--border)` are literals and are never resolved further.

use std::sync::OnceLock;

use regex::Regex;

use crate::config::MULTI_VALUE_DELIMITER;

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^var\((--[A-Za-z0-9-]+)\)$").expect("valid reference pattern"))
}

/// A classified raw value, borrowing from the source string
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    /// Terminal text, not resolved any further
    Literal(&'a str),
    /// Reference to another variable; holds the name with its `--` prefix
    Reference(&'a str),
    /// Alternatives separated by the multi-value delimiter, in order
    Multi(Vec<&'a str>),
}

impl<'a> RawValue<'a> {
    /// Classify a raw value string
    pub fn parse(text: &'a str) -> Self {
        if is_multi_valued(text) {
            RawValue::Multi(split_values(text))
        } else if let Some(name) = reference_name(text) {
            RawValue::Reference(name)
        } else {
            RawValue::Literal(text)
        }
    }
}

/// Referenced variable name (with `--`) if the whole value is `var(--name)`
pub fn reference_name(value: &str) -> Option<&str> {
    reference_regex()
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether a raw value holds more than one alternative
pub fn is_multi_valued(value: &str) -> bool {
    value.contains(MULTI_VALUE_DELIMITER)
}

/// Single top-level split on the multi-value delimiter
pub fn split_values(value: &str) -> Vec<&str> {
    value.split(MULTI_VALUE_DELIMITER).collect()
}

/// Join alternatives back into one raw value
pub fn join_values<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<_>>()
        .join(MULTI_VALUE_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_must_span_whole_value() {
        assert_eq!(reference_name("var(--brand)"), Some("--brand"));
        assert_eq!(reference_name("var(--color-primary-500)"), Some("--color-primary-500"));
        assert_eq!(reference_name("1px solid var(--border)"), None);
        assert_eq!(reference_name("var(--a) var(--b)"), None);
        assert_eq!(reference_name("var(brand)"), None);
        assert_eq!(reference_name("var(--)"), None);
        assert_eq!(reference_name(" var(--brand)"), None);
    }

    #[test]
    fn test_parse_classification() {
        assert_eq!(RawValue::parse("#3b82f6"), RawValue::Literal("#3b82f6"));
        assert_eq!(RawValue::parse("var(--brand)"), RawValue::Reference("--brand"));
        assert_eq!(
            RawValue::parse("10px | var(--gap)"),
            RawValue::Multi(vec!["10px", "var(--gap)"])
        );
    }

    #[test]
    fn test_delimiter_needs_surrounding_spaces() {
        assert!(!is_multi_valued("a|b"));
        assert!(is_multi_valued("a | b"));
        assert_eq!(split_values("a | b | c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_multi_value_parts_are_not_references() {
        assert_eq!(
            RawValue::parse("var(--a) | var(--b)"),
            RawValue::Multi(vec!["var(--a)", "var(--b)"])
        );
        assert_eq!(RawValue::parse("var(--a)|var(--b)"), RawValue::Literal("var(--a)|var(--b)"));
        assert_eq!(join_values(&["var(--a)", "2px", "var(--b)"]), "var(--a) | 2px | var(--b)");
    }
}
