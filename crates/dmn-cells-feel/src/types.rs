//! Cell classification by data type
//!
//! A cell belongs to at most one [`DataType`]. The input expression's type
//! reference decides when present, otherwise the column's own type
//! reference. Header and footer cells never classify.

use crate::error::FeelError;
use dmn_cells_core::{CellRef, Column};
use std::fmt;
use std::str::FromStr;

/// Data types with a structured cell editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DataType {
    Date,
    Number,
    String,
}

impl DataType {
    /// Map a DMN type reference to a data type
    pub fn from_type_ref(type_ref: &str) -> Option<Self> {
        match type_ref {
            "date" => Some(DataType::Date),
            "number" | "integer" | "long" | "double" => Some(DataType::Number),
            "string" => Some(DataType::String),
            _ => None,
        }
    }

    /// Name used in type references and UI
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Date => "date",
            DataType::Number => "number",
            DataType::String => "string",
        }
    }

    /// Data type declared by a column
    ///
    /// A recognized input expression type wins over the column's own type.
    pub fn of_column(column: &Column) -> Option<Self> {
        column
            .input_type_ref()
            .and_then(Self::from_type_ref)
            .or_else(|| column.type_ref.as_deref().and_then(Self::from_type_ref))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = FeelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_type_ref(s).ok_or_else(|| FeelError::UnknownDataType(s.to_string()))
    }
}

/// Classify a cell; `None` for header/footer cells and untyped columns
pub fn classify(cell: &CellRef<'_>) -> Option<DataType> {
    if !cell.row.is_body() {
        return None;
    }
    DataType::of_column(cell.column)
}

/// A data type with its text ⇄ structured value conversion
pub trait CellType {
    /// The data type this implementation handles
    const DATA_TYPE: DataType;

    /// Structured form of a cell entry
    type Value;

    /// Parse cell text; `None` when the text has no structured form
    fn parse(text: &str) -> Option<Self::Value>;

    /// Serialize a structured value back into cell text
    fn format(value: &Self::Value) -> String;

    /// Whether a cell belongs to this data type
    fn classify(cell: &CellRef<'_>) -> bool {
        classify(cell) == Some(Self::DATA_TYPE)
    }
}

/// Date cells (`date and time("…")` entries)
#[derive(Debug, Clone, Copy, Default)]
pub struct DateCell;

/// Number cells (comparisons and ranges)
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberCell;

/// String cells (quoted disjunctions and negations)
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCell;

impl CellType for DateCell {
    const DATA_TYPE: DataType = DataType::Date;
    type Value = crate::date::ParsedDate;

    fn parse(text: &str) -> Option<Self::Value> {
        crate::date::parse_date(text)
    }

    fn format(value: &Self::Value) -> String {
        crate::date::format_date(value)
    }
}

impl CellType for NumberCell {
    const DATA_TYPE: DataType = DataType::Number;
    type Value = crate::number::ParsedNumber;

    fn parse(text: &str) -> Option<Self::Value> {
        crate::number::parse_number(text)
    }

    fn format(value: &Self::Value) -> String {
        crate::number::format_number(value)
    }
}

impl CellType for StringCell {
    const DATA_TYPE: DataType = DataType::String;
    type Value = crate::string::ParsedString;

    fn parse(text: &str) -> Option<Self::Value> {
        crate::string::parse_string(text)
    }

    fn format(value: &Self::Value) -> String {
        crate::string::format_string(value)
    }
}
