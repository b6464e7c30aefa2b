//! String entries
//!
//! String cells hold one of:
//! - nothing (whitespace only)
//! - a disjunction of quoted values: `"a", "b"`
//! - a negated disjunction: `not("a", "b")`
//!
//! Every comma separated token must be wrapped in double quotes and contain
//! no other quote. Empty tokens (`""`) are rejected.

use crate::error::FeelError;
use dmn_cells_core::Column;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static NEGATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*not\((.*)\)\s*$").expect("valid negation pattern"));

/// Kind of a string entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StringKind {
    #[default]
    Empty,
    Disjunction,
    Negation,
}

impl StringKind {
    /// Name used in the kind dropdown (`""` for empty)
    pub fn as_str(&self) -> &'static str {
        match self {
            StringKind::Empty => "",
            StringKind::Disjunction => "disjunction",
            StringKind::Negation => "negation",
        }
    }
}

impl fmt::Display for StringKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StringKind {
    type Err = FeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "empty" => Ok(StringKind::Empty),
            "disjunction" => Ok(StringKind::Disjunction),
            "negation" => Ok(StringKind::Negation),
            _ => Err(FeelError::UnknownKind(s.to_string())),
        }
    }
}

/// A parsed string entry
///
/// Values are unquoted and kept in entry order. Values of an empty entry
/// are ignored when formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParsedString {
    pub kind: StringKind,
    pub values: Vec<String>,
}

impl ParsedString {
    /// The empty entry
    pub fn empty() -> Self {
        Self::default()
    }

    /// A disjunction of values
    pub fn disjunction<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: StringKind::Disjunction,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// A negated disjunction of values
    pub fn negation<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: StringKind::Negation,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a value
    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Remove the first occurrence of a value; `false` if absent
    pub fn remove(&mut self, value: &str) -> bool {
        match self.values.iter().position(|v| v == value) {
            Some(index) => {
                self.values.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether a value is in the list
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

fn unquote(token: &str) -> Option<&str> {
    let inner = token.trim().strip_prefix('"')?.strip_suffix('"')?;
    if inner.is_empty() || inner.contains('"') {
        return None;
    }
    Some(inner)
}

fn quoted_list(text: &str) -> Option<Vec<String>> {
    text.split(',')
        .map(|token| unquote(token).map(str::to_string))
        .collect()
}

/// Parse string entry text
///
/// `None` when the text is neither empty, a quoted disjunction nor a
/// negated quoted disjunction.
pub fn parse_string(text: &str) -> Option<ParsedString> {
    if text.trim().is_empty() {
        return Some(ParsedString::empty());
    }

    if let Some(values) = quoted_list(text) {
        return Some(ParsedString::disjunction(values));
    }

    if let Some(caps) = NEGATION.captures(text) {
        if let Some(values) = quoted_list(&caps[1]) {
            return Some(ParsedString::negation(values));
        }
    }

    tracing::trace!("string text {text:?} is a foreign expression");
    None
}

/// Serialize a string entry
pub fn format_string(value: &ParsedString) -> String {
    if value.kind == StringKind::Empty {
        return String::new();
    }

    let values = value
        .values
        .iter()
        .map(|v| format!("\"{v}\""))
        .collect::<Vec<_>>()
        .join(", ");

    match value.kind {
        StringKind::Negation => format!("not({values})"),
        _ => values,
    }
}

/// Values declared for a column (`inputValues`, else `outputValues`)
///
/// Tokens are comma separated and optionally quoted; quotes are removed.
/// `None` when the column declares no values.
pub fn parse_allowed_values(column: &Column) -> Option<Vec<String>> {
    let text = column.declared_values()?;
    let values = text
        .split(',')
        .map(str::trim)
        .map(|token| {
            if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
                &token[1..token.len() - 1]
            } else {
                token
            }
        })
        .map(str::to_string)
        .collect();
    Some(values)
}

/// Free-text input is valid while it contains no quote character
pub fn is_valid_free_input(text: &str) -> bool {
    !text.contains('"')
}

/// Split committed free-text input into values
///
/// `None` for invalid input. Tokens are trimmed and empty tokens dropped.
pub fn split_free_input(text: &str) -> Option<Vec<String>> {
    if !is_valid_free_input(text) {
        return None;
    }
    Some(
        text.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_string(""), Some(ParsedString::empty()));
        assert_eq!(parse_string("   "), Some(ParsedString::empty()));
        assert_eq!(format_string(&ParsedString::empty()), "");
    }

    #[test]
    fn test_parse_disjunction() {
        assert_eq!(
            parse_string(r#""a", "b""#),
            Some(ParsedString::disjunction(["a", "b"]))
        );
        assert_eq!(
            parse_string(r#""Fall""#),
            Some(ParsedString::disjunction(["Fall"]))
        );
        assert_eq!(
            parse_string(r#"  "with space" ,"x"  "#),
            Some(ParsedString::disjunction(["with space", "x"]))
        );
    }

    #[test]
    fn test_disjunction_requires_quotes() {
        assert_eq!(parse_string(r#""a", b"#), None);
        assert_eq!(parse_string(r#""a"b""#), None);
        assert_eq!(parse_string(r#""a", """#), None);
        assert_eq!(parse_string(r#""a",, "b""#), None);
    }

    #[test]
    fn test_parse_negation() {
        assert_eq!(
            parse_string(r#"not("a","b")"#),
            Some(ParsedString::negation(["a", "b"]))
        );
        assert_eq!(
            parse_string(r#" not( "a" ) "#),
            Some(ParsedString::negation(["a"]))
        );
        assert_eq!(parse_string("not(a)"), None);
        assert_eq!(parse_string("not()"), None);
    }

    #[test]
    fn test_format() {
        assert_eq!(
            format_string(&ParsedString::disjunction(["a", "b"])),
            r#""a", "b""#
        );
        assert_eq!(
            format_string(&ParsedString::negation(["a", "b"])),
            r#"not("a", "b")"#
        );
        let mut empty = ParsedString::disjunction(["a"]);
        empty.kind = StringKind::Empty;
        assert_eq!(format_string(&empty), "");
    }

    #[test]
    fn test_value_list_edits() {
        let mut parsed = ParsedString::disjunction(["a", "b", "a"]);
        assert!(parsed.remove("a"));
        assert_eq!(parsed.values, vec!["b", "a"]);
        assert!(!parsed.remove("z"));
        parsed.push("c");
        assert!(parsed.contains("c"));
    }

    #[test]
    fn test_allowed_values() {
        let column = Column::input("i").with_input_values(r#""gold", "silver",bronze"#);
        assert_eq!(
            parse_allowed_values(&column),
            Some(vec!["gold".into(), "silver".into(), "bronze".into()])
        );

        let column = Column::output("o").with_output_values(r#""yes","no""#);
        assert_eq!(
            parse_allowed_values(&column),
            Some(vec!["yes".into(), "no".into()])
        );

        assert_eq!(parse_allowed_values(&Column::input("i")), None);
    }

    #[test]
    fn test_free_input() {
        assert!(is_valid_free_input("a, b"));
        assert!(!is_valid_free_input("a\""));
        assert_eq!(
            split_free_input(" a, b ,,c"),
            Some(vec!["a".into(), "b".into(), "c".into()])
        );
        assert_eq!(split_free_input("\"a\""), None);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("".parse::<StringKind>(), Ok(StringKind::Empty));
        assert_eq!("negation".parse::<StringKind>(), Ok(StringKind::Negation));
        assert!("conjunction".parse::<StringKind>().is_err());
    }
}
