//! # dmn-cells-core
//!
//! Core data structures for the dmn-cells decision table editors.
//!
//! This crate provides the document model the cell editors operate on:
//! - [`Row`] - Head, body and foot rows of a decision table
//! - [`Column`] - Input/output columns with their type references and
//!   declared value lists
//! - [`CellKey`] and [`CellContent`] - Cell addressing and textual content
//! - [`DecisionTable`] - The document owning rows, columns and cells
//!
//! ## Example
//!
//! ```rust
//! use dmn_cells_core::{Column, DecisionTable, Row};
//!
//! let mut table = DecisionTable::new("decision");
//! table.add_column(Column::input("amount").with_type_ref("number")).unwrap();
//! table.add_row(Row::body("rule1")).unwrap();
//!
//! table.set_text("rule1", "amount", ">= 5").unwrap();
//! assert_eq!(table.text("rule1", "amount"), Some(">= 5"));
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod row;
pub mod table;

// Re-exports for convenience
pub use cell::{CellContent, CellKey, CellRef};
pub use column::{Column, ColumnKind, InputExpression};
pub use error::{Error, Result};
pub use row::{Row, RowKind};
pub use table::DecisionTable;
