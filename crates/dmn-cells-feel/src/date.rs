//! Date entries
//!
//! Three shapes are recognized, tried in this order:
//! - between: `[date and time("2016-03-01T00:00:00")..date and time("2016-03-31T23:59:59")]`
//! - before/after: `< date and time("…")`, `> date and time("…")`
//! - exact: `date and time("…")`
//!
//! Date-times are second precision without zone suffix and are read as UTC.

use crate::error::FeelError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, NaiveTime, TimeZone, Utc};
use dmn_cells_core::CellContent;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Pattern of a stored date-time
const ISO_PATTERN: &str = r"\d{4}(?:-\d\d){2}T(?:\d\d:){2}\d\d";

/// chrono format matching [`ISO_PATTERN`]
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default display format: UTC string without seconds and zone
pub const DISPLAY_FORMAT: &str = "%a, %d %b %Y %H:%M";

static BETWEEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^\[date and time\("({ISO_PATTERN})"\)\.\.date and time\("({ISO_PATTERN})"\)"#
    ))
    .expect("valid between pattern")
});

static BEFORE_AFTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^(<|>)\s*date and time\("({ISO_PATTERN})"\)"#))
        .expect("valid before/after pattern")
});

static EXACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r#"^date and time\("({ISO_PATTERN})"\)$"#)).expect("valid exact pattern")
});

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(ISO_PATTERN).expect("valid iso date pattern"));

/// Kind of a date entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DateKind {
    Exact,
    Before,
    After,
    Between,
}

impl DateKind {
    /// Keyword used in rendered text and UI
    pub fn as_str(&self) -> &'static str {
        match self {
            DateKind::Exact => "exact",
            DateKind::Before => "before",
            DateKind::After => "after",
            DateKind::Between => "between",
        }
    }
}

impl fmt::Display for DateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateKind {
    type Err = FeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(DateKind::Exact),
            "before" => Ok(DateKind::Before),
            "after" => Ok(DateKind::After),
            "between" => Ok(DateKind::Between),
            _ => Err(FeelError::UnknownKind(s.to_string())),
        }
    }
}

/// A parsed date entry
///
/// The second date only exists for [`ParsedDate::Between`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParsedDate {
    Exact(NaiveDateTime),
    Before(NaiveDateTime),
    After(NaiveDateTime),
    Between(NaiveDateTime, NaiveDateTime),
}

impl ParsedDate {
    /// Kind of this entry
    pub fn kind(&self) -> DateKind {
        match self {
            ParsedDate::Exact(_) => DateKind::Exact,
            ParsedDate::Before(_) => DateKind::Before,
            ParsedDate::After(_) => DateKind::After,
            ParsedDate::Between(_, _) => DateKind::Between,
        }
    }

    /// First (or only) date
    pub fn date1(&self) -> NaiveDateTime {
        match *self {
            ParsedDate::Exact(date)
            | ParsedDate::Before(date)
            | ParsedDate::After(date)
            | ParsedDate::Between(date, _) => date,
        }
    }

    /// Second date, only for between entries
    pub fn date2(&self) -> Option<NaiveDateTime> {
        match *self {
            ParsedDate::Between(_, date) => Some(date),
            _ => None,
        }
    }

    /// Convert to another kind, keeping the first date
    ///
    /// Switching to between without a second date uses the end of today
    /// (see [`sample_date`]).
    pub fn with_kind(self, kind: DateKind, now: DateTime<Utc>) -> Self {
        let date1 = self.date1();
        match kind {
            DateKind::Exact => ParsedDate::Exact(date1),
            DateKind::Before => ParsedDate::Before(date1),
            DateKind::After => ParsedDate::After(date1),
            DateKind::Between => {
                ParsedDate::Between(date1, self.date2().unwrap_or_else(|| end_of_day(now)))
            }
        }
    }
}

fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(text, ISO_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::trace!("date-time {text:?} has the right shape but is invalid: {e}");
            None
        }
    }
}

/// Parse date entry text
///
/// Returns `None` for text matching none of the shapes, and for
/// well-shaped text naming an impossible date-time.
pub fn parse_date(text: &str) -> Option<ParsedDate> {
    if let Some(caps) = BETWEEN.captures(text) {
        return Some(ParsedDate::Between(
            parse_iso(&caps[1])?,
            parse_iso(&caps[2])?,
        ));
    }

    if let Some(caps) = BEFORE_AFTER.captures(text) {
        let date = parse_iso(&caps[2])?;
        return Some(if &caps[1] == "<" {
            ParsedDate::Before(date)
        } else {
            ParsedDate::After(date)
        });
    }

    if let Some(caps) = EXACT.captures(text) {
        return parse_iso(&caps[1]).map(ParsedDate::Exact);
    }

    None
}

fn literal(date: NaiveDateTime) -> String {
    format!("date and time(\"{}\")", date.format(ISO_FORMAT))
}

/// Serialize a date entry back into cell text
pub fn format_date(value: &ParsedDate) -> String {
    match *value {
        ParsedDate::Exact(date) => literal(date),
        ParsedDate::Before(date) => format!("< {}", literal(date)),
        ParsedDate::After(date) => format!("> {}", literal(date)),
        ParsedDate::Between(start, end) => format!("[{}..{}]", literal(start), literal(end)),
    }
}

/// Whether text contains an ISO date-time (`YYYY-MM-DDTHH:MM:SS`)
pub fn is_iso_date_string(text: &str) -> bool {
    ISO_DATE.is_match(text)
}

fn end_of_day(now: DateTime<Utc>) -> NaiveDateTime {
    let time = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    now.date_naive().and_time(time)
}

/// Today's date as stored date-time text
///
/// Start of day (`00:00:00`) by default, end of day (`23:59:59`) with
/// `end_of_day` set.
pub fn sample_date(end_of_day_time: bool, now: DateTime<Utc>) -> String {
    let date = if end_of_day_time {
        end_of_day(now)
    } else {
        now.date_naive().and_time(NaiveTime::MIN)
    };
    date.format(ISO_FORMAT).to_string()
}

/// What a date cell shows while the structured view is active
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateDisplay {
    /// Empty cell, shown as a centered placeholder
    Placeholder,
    /// Text that is not a date entry, optionally with its description
    Expression { description: Option<String> },
    /// Human readable date entry
    Date(String),
}

impl DateDisplay {
    /// Text of the display, using `placeholder` for empty cells
    pub fn text_with_placeholder(&self, placeholder: &str) -> String {
        match self {
            DateDisplay::Placeholder => placeholder.to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for DateDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateDisplay::Placeholder => f.write_str("-"),
            DateDisplay::Expression {
                description: Some(description),
            } => write!(f, "[expression] ({description})"),
            DateDisplay::Expression { description: None } => f.write_str("[expression]"),
            DateDisplay::Date(text) => f.write_str(text),
        }
    }
}

/// Whether a chrono format string only holds valid items
pub fn is_valid_display_format(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn display(date: NaiveDateTime, pattern: &str) -> String {
    let date = Utc.from_utc_datetime(&date);
    let mut text = String::new();
    if write!(text, "{}", date.format(pattern)).is_err() {
        tracing::warn!("invalid date display format {pattern:?}, using {DISPLAY_FORMAT:?}");
        text.clear();
        // DISPLAY_FORMAT holds valid items only
        let _ = write!(text, "{}", date.format(DISPLAY_FORMAT));
    }
    text
}

/// Render a date cell for display
///
/// `pattern` is a chrono format string, usually [`DISPLAY_FORMAT`].
pub fn render_date(content: &CellContent, pattern: &str) -> DateDisplay {
    if content.text.is_empty() {
        return DateDisplay::Placeholder;
    }

    let Some(parsed) = parse_date(&content.text) else {
        return DateDisplay::Expression {
            description: content
                .description
                .clone()
                .filter(|description| !description.is_empty()),
        };
    };

    let first = display(parsed.date1(), pattern);
    let text = match parsed {
        ParsedDate::Exact(_) => first,
        ParsedDate::Between(_, end) => {
            format!("{} {} and {}", parsed.kind(), first, display(end, pattern))
        }
        _ => format!("{} {}", parsed.kind(), first),
    };
    DateDisplay::Date(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_exact() {
        assert_eq!(
            parse_date(r#"date and time("2015-11-30T12:00:00")"#),
            Some(ParsedDate::Exact(dt(2015, 11, 30, 12, 0, 0)))
        );
        // exact must span the whole text
        assert_eq!(parse_date(r#"date and time("2015-11-30T12:00:00") "#), None);
    }

    #[test]
    fn test_parse_before_after() {
        assert_eq!(
            parse_date(r#"< date and time("2015-11-30T12:00:00")"#),
            Some(ParsedDate::Before(dt(2015, 11, 30, 12, 0, 0)))
        );
        assert_eq!(
            parse_date(r#">date and time("2015-11-30T12:00:00")"#),
            Some(ParsedDate::After(dt(2015, 11, 30, 12, 0, 0)))
        );
    }

    #[test]
    fn test_parse_between_keeps_order() {
        let parsed = parse_date(
            r#"[date and time("2015-11-30T12:00:00")..date and time("2015-12-01T23:59:59")]"#,
        )
        .unwrap();
        assert_eq!(parsed.kind(), DateKind::Between);
        assert_eq!(parsed.date1(), dt(2015, 11, 30, 12, 0, 0));
        assert_eq!(parsed.date2(), Some(dt(2015, 12, 1, 23, 59, 59)));
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("today()"), None);
        assert_eq!(parse_date(r#"date and time("2015-11-30")"#), None);
        assert_eq!(parse_date(r#"date and time("2015-11-30T12:00:00.000")"#), None);
        assert_eq!(parse_date(r#"date and time("2015-11-30T12:00:00Z")"#), None);
        assert_eq!(parse_date(r#"date and time("2015-13-45T12:00:00")"#), None);
        assert_eq!(
            parse_date(r#"[date and time("2015-11-30T12:00:00")xxdate and time("2015-12-01T23:59:59")]"#),
            None
        );
    }

    #[test]
    fn test_date_invariant() {
        let date = dt(2020, 1, 1, 0, 0, 0);
        assert_eq!(ParsedDate::Exact(date).date2(), None);
        assert_eq!(ParsedDate::Before(date).date2(), None);
        assert_eq!(ParsedDate::After(date).date2(), None);
        assert_eq!(ParsedDate::Between(date, date).date2(), Some(date));
    }

    #[test]
    fn test_format_date() {
        let start = dt(2015, 11, 30, 12, 0, 0);
        let end = dt(2015, 12, 1, 23, 59, 59);
        assert_eq!(
            format_date(&ParsedDate::Exact(start)),
            r#"date and time("2015-11-30T12:00:00")"#
        );
        assert_eq!(
            format_date(&ParsedDate::Before(start)),
            r#"< date and time("2015-11-30T12:00:00")"#
        );
        assert_eq!(
            format_date(&ParsedDate::After(start)),
            r#"> date and time("2015-11-30T12:00:00")"#
        );
        let between = format_date(&ParsedDate::Between(start, end));
        assert_eq!(
            between,
            r#"[date and time("2015-11-30T12:00:00")..date and time("2015-12-01T23:59:59")]"#
        );
        assert_eq!(parse_date(&between), Some(ParsedDate::Between(start, end)));
    }

    #[test]
    fn test_render_exact_strips_seconds() {
        let content = CellContent::new(r#"date and time("2015-11-30T12:34:56")"#);
        assert_eq!(
            render_date(&content, DISPLAY_FORMAT),
            DateDisplay::Date("Mon, 30 Nov 2015 12:34".into())
        );
    }

    #[test]
    fn test_render_kinds() {
        let content = CellContent::new(r#"< date and time("2015-11-30T12:00:00")"#);
        assert_eq!(
            render_date(&content, DISPLAY_FORMAT).to_string(),
            "before Mon, 30 Nov 2015 12:00"
        );

        let content = CellContent::new(r#"> date and time("2015-11-30T12:00:00")"#);
        assert_eq!(
            render_date(&content, DISPLAY_FORMAT).to_string(),
            "after Mon, 30 Nov 2015 12:00"
        );

        let content = CellContent::new(
            r#"[date and time("2015-11-30T12:00:00")..date and time("2015-12-01T23:59:59")]"#,
        );
        assert_eq!(
            render_date(&content, DISPLAY_FORMAT).to_string(),
            "between Mon, 30 Nov 2015 12:00 and Tue, 01 Dec 2015 23:59"
        );
    }

    #[test]
    fn test_render_fallbacks() {
        assert_eq!(
            render_date(&CellContent::new(""), DISPLAY_FORMAT),
            DateDisplay::Placeholder
        );
        assert_eq!(
            render_date(&CellContent::new("now()"), DISPLAY_FORMAT).to_string(),
            "[expression]"
        );
        assert_eq!(
            render_date(
                &CellContent::new("now()").with_description("the current time"),
                DISPLAY_FORMAT
            )
            .to_string(),
            "[expression] (the current time)"
        );
        assert_eq!(
            render_date(
                &CellContent::new("now()").with_description(""),
                DISPLAY_FORMAT
            )
            .to_string(),
            "[expression]"
        );
        assert_eq!(DateDisplay::Placeholder.text_with_placeholder("–"), "–");
    }

    #[test]
    fn test_invalid_display_format_falls_back() {
        assert!(is_valid_display_format(DISPLAY_FORMAT));
        assert!(!is_valid_display_format("%Q"));

        let content = CellContent::new(r#"date and time("2015-11-30T12:34:56")"#);
        assert_eq!(
            render_date(&content, "%Q"),
            DateDisplay::Date("Mon, 30 Nov 2015 12:34".into())
        );
    }

    #[test]
    fn test_is_iso_date_string() {
        assert!(is_iso_date_string("2015-11-30T12:00:00"));
        assert!(is_iso_date_string("x 2015-11-30T12:00:00 y"));
        assert!(!is_iso_date_string("2015-11-30"));
    }

    #[test]
    fn test_sample_date_and_with_kind() {
        let now = Utc.with_ymd_and_hms(2016, 3, 4, 15, 16, 17).unwrap();
        assert_eq!(sample_date(false, now), "2016-03-04T00:00:00");
        assert_eq!(sample_date(true, now), "2016-03-04T23:59:59");

        let exact = ParsedDate::Exact(dt(2016, 1, 1, 0, 0, 0));
        assert_eq!(
            exact.with_kind(DateKind::Between, now),
            ParsedDate::Between(dt(2016, 1, 1, 0, 0, 0), dt(2016, 3, 4, 23, 59, 59))
        );
        assert_eq!(
            exact.with_kind(DateKind::After, now),
            ParsedDate::After(dt(2016, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!("between".parse::<DateKind>(), Ok(DateKind::Between));
        assert!("later".parse::<DateKind>().is_err());
    }
}
