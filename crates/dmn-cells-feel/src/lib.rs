//! # dmn-cells-feel
//!
//! Text ⇄ structured value conversion for decision table cell entries.
//!
//! This crate provides:
//! - Cell classification by data type ([`classify`])
//! - Date entries: `date and time("…")` literals, before/after/between
//! - Number entries: comparisons (`>= 5`) and ranges (`[1..10[`)
//! - String entries: quoted disjunctions (`"a", "b"`) and negations (`not("a")`)
//!
//! Parsers never fail loudly. Text that does not have the expected shape
//! parses to `None` and callers fall back to showing the raw expression.
//!
//! ## Example
//!
//! ```rust
//! use dmn_cells_feel::number::{format_comparison, parse_comparison, Operator};
//!
//! let comparison = parse_comparison(">= 5");
//! assert_eq!(comparison.operator, Operator::GreaterEqual);
//! assert_eq!(comparison.operand, "5");
//! assert_eq!(format_comparison(&comparison), ">= 5");
//! ```

pub mod date;
pub mod error;
pub mod number;
pub mod string;
pub mod types;

pub use date::{
    format_date, is_valid_display_format, parse_date, render_date, DateDisplay, DateKind,
    ParsedDate,
};
pub use error::{FeelError, FeelResult};
pub use number::{
    editing_type, format_number, get_operator, parse_number, EditingType, NumberComparison,
    NumberRange, Operator, OperatorMatch, ParsedNumber,
};
pub use string::{format_string, parse_allowed_values, parse_string, ParsedString, StringKind};
pub use types::{classify, CellType, DataType, DateCell, NumberCell, StringCell};
