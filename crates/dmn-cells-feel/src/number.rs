//! Number entries
//!
//! Number cells hold either a comparison or a range:
//! - comparison: `5`, `< 5`, `<= 5`, `> 5`, `>= 5` (a bare number means `=`)
//! - range: `[1..10]`, `[1..10[`, `]1..10]`, `]1..10[`
//!
//! Bracket meaning depends on the side. `[` opens an inclusive start and
//! `]` an exclusive one; `]` closes an inclusive end and `[` an exclusive one.

use crate::error::FeelError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Operator table: UI label and serialized symbol, in dropdown order
pub const OPERATORS: [(&str, &str); 5] = [
    ("equals", "="),
    ("less", "<"),
    ("less-equal", "<="),
    ("greater", ">"),
    ("greater-equal", ">="),
];

static RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\[\]]*?)\.\.([^\[\]]*)").expect("valid range pattern"));

/// Result of an operator table lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorMatch {
    /// The other side of the matched pair (symbol for a label, label for a symbol)
    pub operator: &'static str,
    /// Dropdown index of the pair
    pub index: usize,
}

/// Look up a label or a symbol in the operator table
///
/// Looking up a symbol yields its label and looking up a label yields its
/// symbol, so the lookup is its own inverse.
pub fn get_operator(text: &str) -> Option<OperatorMatch> {
    OPERATORS
        .iter()
        .enumerate()
        .find_map(|(index, &(label, symbol))| {
            if text == label {
                Some(OperatorMatch {
                    operator: symbol,
                    index,
                })
            } else if text == symbol {
                Some(OperatorMatch {
                    operator: label,
                    index,
                })
            } else {
                None
            }
        })
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Operator {
    #[default]
    Equals,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl Operator {
    /// All operators in dropdown order
    pub const ALL: [Operator; 5] = [
        Operator::Equals,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
    ];

    /// Dropdown index
    pub fn index(&self) -> usize {
        match self {
            Operator::Equals => 0,
            Operator::Less => 1,
            Operator::LessEqual => 2,
            Operator::Greater => 3,
            Operator::GreaterEqual => 4,
        }
    }

    /// Operator at a dropdown index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// UI label (e.g. "less-equal")
    pub fn label(&self) -> &'static str {
        OPERATORS[self.index()].0
    }

    /// Serialized symbol (e.g. "<=")
    pub fn symbol(&self) -> &'static str {
        OPERATORS[self.index()].1
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = FeelError;

    /// Accepts either a label or a symbol
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        get_operator(s)
            .and_then(|found| Self::from_index(found.index))
            .ok_or_else(|| FeelError::UnknownOperator(s.to_string()))
    }
}

/// Which sub-editor handles a number cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EditingType {
    Comparison,
    Range,
}

impl EditingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditingType::Comparison => "comparison",
            EditingType::Range => "range",
        }
    }
}

impl fmt::Display for EditingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditingType {
    type Err = FeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comparison" => Ok(EditingType::Comparison),
            "range" => Ok(EditingType::Range),
            _ => Err(FeelError::UnknownEditingType(s.to_string())),
        }
    }
}

/// Decide how a number cell is edited
///
/// Empty text and text containing a bracket, a comparison operator or a
/// digit is editable: brackets select the range editor, anything else the
/// comparison editor. Other text is not editable (`None`).
pub fn editing_type(text: &str) -> Option<EditingType> {
    let is_bracket = |c: char| c == '[' || c == ']';
    let editable = text.is_empty()
        || text
            .chars()
            .any(|c| is_bracket(c) || matches!(c, '<' | '>' | '=') || c.is_ascii_digit());

    if !editable {
        return None;
    }

    if text.contains(is_bracket) {
        Some(EditingType::Range)
    } else {
        Some(EditingType::Comparison)
    }
}

/// `<op> <number>` entry; the operand is kept as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberComparison {
    pub operator: Operator,
    pub operand: String,
}

impl NumberComparison {
    pub fn new(operator: Operator, operand: impl Into<String>) -> Self {
        Self {
            operator,
            operand: operand.into(),
        }
    }
}

/// `<bracket><start>..<end><bracket>` entry; bounds are kept as text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberRange {
    pub start: String,
    pub end: String,
    pub start_inclusive: bool,
    pub end_inclusive: bool,
}

impl Default for NumberRange {
    fn default() -> Self {
        Self {
            start: String::new(),
            end: String::new(),
            start_inclusive: true,
            end_inclusive: true,
        }
    }
}

impl NumberRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            ..Self::default()
        }
    }

    /// Set bound inclusivity
    pub fn with_inclusive(mut self, start: bool, end: bool) -> Self {
        self.start_inclusive = start;
        self.end_inclusive = end;
        self
    }
}

/// A parsed number entry
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParsedNumber {
    Comparison(NumberComparison),
    Range(NumberRange),
}

impl ParsedNumber {
    pub fn editing_type(&self) -> EditingType {
        match self {
            ParsedNumber::Comparison(_) => EditingType::Comparison,
            ParsedNumber::Range(_) => EditingType::Range,
        }
    }
}

/// Parse comparison text
///
/// A leading operator is split off (longest symbol first); text without an
/// operator is an `=` comparison of the whole text.
pub fn parse_comparison(text: &str) -> NumberComparison {
    let text = text.trim();

    let mut by_length = Operator::ALL;
    by_length.sort_by_key(|op| std::cmp::Reverse(op.symbol().len()));

    for operator in by_length {
        if let Some(rest) = text.strip_prefix(operator.symbol()) {
            return NumberComparison::new(operator, rest.trim());
        }
    }

    NumberComparison::new(Operator::Equals, text)
}

/// Serialize a comparison
///
/// The `=` operator is omitted; a missing operand yields empty text.
pub fn format_comparison(comparison: &NumberComparison) -> String {
    let operand = comparison.operand.trim();
    if operand.is_empty() {
        return String::new();
    }

    match comparison.operator {
        Operator::Equals => operand.to_string(),
        operator => format!("{} {}", operator.symbol(), operand),
    }
}

/// Parse range text
///
/// Splits on the first `..` outside brackets. The first bracket in the text
/// decides start inclusivity, the second end inclusivity.
pub fn parse_range(text: &str) -> Option<NumberRange> {
    let caps = RANGE.captures(text)?;

    let mut brackets = text.chars().filter(|&c| c == '[' || c == ']');
    let start_inclusive = brackets.next() == Some('[');
    let end_inclusive = brackets.next() == Some(']');

    Some(NumberRange {
        start: caps[1].trim().to_string(),
        end: caps[2].trim().to_string(),
        start_inclusive,
        end_inclusive,
    })
}

/// Serialize a range; empty text unless both bounds are present
pub fn format_range(range: &NumberRange) -> String {
    let start = range.start.trim();
    let end = range.end.trim();
    if start.is_empty() || end.is_empty() {
        return String::new();
    }

    let open = if range.start_inclusive { '[' } else { ']' };
    let close = if range.end_inclusive { ']' } else { '[' };
    format!("{open}{start}..{end}{close}")
}

/// Parse number entry text
///
/// `None` when the text is not editable as a number (see [`editing_type`]).
/// Range-looking text without a `..` separator yields an empty range.
pub fn parse_number(text: &str) -> Option<ParsedNumber> {
    match editing_type(text)? {
        EditingType::Comparison => Some(ParsedNumber::Comparison(parse_comparison(text))),
        EditingType::Range => {
            let range = parse_range(text).unwrap_or_else(|| {
                tracing::trace!("range text {text:?} has no bounds");
                NumberRange::default()
            });
            Some(ParsedNumber::Range(range))
        }
    }
}

/// Serialize a number entry
pub fn format_number(value: &ParsedNumber) -> String {
    match value {
        ParsedNumber::Comparison(comparison) => format_comparison(comparison),
        ParsedNumber::Range(range) => format_range(range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_get_operator() {
        assert_eq!(
            get_operator(">="),
            Some(OperatorMatch {
                operator: "greater-equal",
                index: 4
            })
        );
        assert_eq!(
            get_operator("less"),
            Some(OperatorMatch {
                operator: "<",
                index: 1
            })
        );
        assert_eq!(get_operator("<>"), None);
    }

    #[test]
    fn test_operator_names() {
        assert_eq!("<=".parse::<Operator>(), Ok(Operator::LessEqual));
        assert_eq!("greater".parse::<Operator>(), Ok(Operator::Greater));
        assert!("!=".parse::<Operator>().is_err());
        assert_eq!(Operator::GreaterEqual.label(), "greater-equal");
        assert_eq!(Operator::from_index(5), None);
    }

    #[test]
    fn test_editing_type() {
        assert_eq!(editing_type(""), Some(EditingType::Comparison));
        assert_eq!(editing_type("5"), Some(EditingType::Comparison));
        assert_eq!(editing_type(">= 5"), Some(EditingType::Comparison));
        assert_eq!(editing_type("[1..5]"), Some(EditingType::Range));
        assert_eq!(editing_type("]"), Some(EditingType::Range));
        assert_eq!(editing_type("abs(x)"), None);
        assert_eq!(editing_type(" "), None);
    }

    #[test]
    fn test_parse_comparison() {
        assert_eq!(
            parse_comparison(">= 5"),
            NumberComparison::new(Operator::GreaterEqual, "5")
        );
        assert_eq!(
            parse_comparison("<10"),
            NumberComparison::new(Operator::Less, "10")
        );
        assert_eq!(
            parse_comparison("42"),
            NumberComparison::new(Operator::Equals, "42")
        );
        assert_eq!(
            parse_comparison("= 7"),
            NumberComparison::new(Operator::Equals, "7")
        );
        assert_eq!(parse_comparison(""), NumberComparison::default());
    }

    #[test]
    fn test_format_comparison() {
        assert_eq!(
            format_comparison(&NumberComparison::new(Operator::Equals, "5")),
            "5"
        );
        assert_eq!(
            format_comparison(&NumberComparison::new(Operator::Less, "5")),
            "< 5"
        );
        assert_eq!(
            format_comparison(&NumberComparison::new(Operator::Greater, "")),
            ""
        );
    }

    #[test]
    fn test_parse_range_brackets() {
        assert_eq!(
            parse_range("[1..10]"),
            Some(NumberRange::new("1", "10").with_inclusive(true, true))
        );
        assert_eq!(
            parse_range("[1..10["),
            Some(NumberRange::new("1", "10").with_inclusive(true, false))
        );
        assert_eq!(
            parse_range("]1..10]"),
            Some(NumberRange::new("1", "10").with_inclusive(false, true))
        );
        assert_eq!(
            parse_range("]1..10["),
            Some(NumberRange::new("1", "10").with_inclusive(false, false))
        );
        assert_eq!(parse_range("[1,10]"), None);
    }

    #[test]
    fn test_format_range_requires_both_bounds() {
        assert_eq!(format_range(&NumberRange::new("1", "")), "");
        assert_eq!(format_range(&NumberRange::new("", "5")), "");
        assert_eq!(
            format_range(&NumberRange::new("1.5", "2").with_inclusive(false, true)),
            "]1.5..2]"
        );
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(
            parse_number(">= 5"),
            Some(ParsedNumber::Comparison(NumberComparison::new(
                Operator::GreaterEqual,
                "5"
            )))
        );
        assert_eq!(
            parse_number("[ 1 .. 2 ["),
            Some(ParsedNumber::Range(
                NumberRange::new("1", "2").with_inclusive(true, false)
            ))
        );
        assert_eq!(
            parse_number("[oops"),
            Some(ParsedNumber::Range(NumberRange::default()))
        );
        assert_eq!(parse_number("foo"), None);
    }

    proptest! {
        #[test]
        fn prop_operator_lookup_is_inverse(index in 0usize..5) {
            let (label, symbol) = OPERATORS[index];
            let by_symbol = get_operator(symbol).unwrap();
            prop_assert_eq!(by_symbol.operator, label);
            prop_assert_eq!(by_symbol.index, index);
            prop_assert_eq!(get_operator(by_symbol.operator).unwrap().operator, symbol);
        }

        #[test]
        fn prop_comparison_serialization(index in 0usize..5, value in -1.0e6f64..1.0e6) {
            let operator = Operator::from_index(index).unwrap();
            let operand = value.to_string();
            let text = format_comparison(&NumberComparison::new(operator, operand.clone()));
            if operator == Operator::Equals {
                prop_assert_eq!(&text, &operand);
            } else {
                prop_assert_eq!(&text, &format!("{} {}", operator.symbol(), operand));
            }
            prop_assert_eq!(parse_comparison(&text), NumberComparison::new(operator, operand));
        }

        #[test]
        fn prop_range_round_trip_is_idempotent(
            a in -1.0e6f64..1.0e6,
            b in -1.0e6f64..1.0e6,
            start_inclusive in any::<bool>(),
            end_inclusive in any::<bool>(),
        ) {
            let range = NumberRange::new(a.to_string(), b.to_string())
                .with_inclusive(start_inclusive, end_inclusive);
            let text = format_range(&range);
            let reparsed = parse_range(&text).unwrap();
            prop_assert_eq!(&reparsed, &range);
            prop_assert_eq!(format_range(&reparsed), text);
        }
    }
}
