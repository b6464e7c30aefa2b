//! Cell-related types
//!
//! This module contains:
//! - [`CellKey`] - A cell's location (row id, column id)
//! - [`CellContent`] - The text stored in a cell plus its description
//! - [`CellRef`] - A borrowed view of a cell together with its row and column

use crate::column::Column;
use crate::row::Row;
use std::fmt;

/// A cell location, identified by row id and column id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellKey {
    /// Row id
    pub row: String,
    /// Column id
    pub column: String,
}

impl CellKey {
    /// Create a new cell key
    pub fn new(row: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            row: row.into(),
            column: column.into(),
        }
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.row, self.column)
    }
}

/// Textual content of a cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellContent {
    /// Raw expression text (possibly empty)
    pub text: String,
    /// Human description of the entry
    pub description: Option<String>,
}

impl CellContent {
    /// Create content from text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: None,
        }
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if the text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A cell together with its row and column
#[derive(Debug, Clone, Copy)]
pub struct CellRef<'a> {
    /// Row the cell belongs to
    pub row: &'a Row,
    /// Column the cell belongs to
    pub column: &'a Column,
    /// Content of the cell
    pub content: &'a CellContent,
}

impl<'a> CellRef<'a> {
    /// Location of this cell
    pub fn key(&self) -> CellKey {
        CellKey::new(self.row.id.clone(), self.column.id.clone())
    }

    /// Raw text of the cell
    pub fn text(&self) -> &'a str {
        &self.content.text
    }
}
