//! # dmn-cells
//!
//! Structured in-place editors for decision table cells.
//!
//! In simple mode the raw text of typed cells is replaced by structured
//! editors layered over the cell:
//!
//! - Date cells show a read-only rendering of their `date and time(...)` entry
//! - Number cells get a comparison (`>= 5`) or range (`[1..10[`) form
//! - String cells get a value list, as a disjunction or its negation
//!
//! Closing a number or string overlay serializes the form and commits the
//! text through the grid's [`Modeling`] API.
//!
//! ## Example
//!
//! ```rust
//! use dmn_cells::prelude::*;
//!
//! let mut table = DecisionTable::new("routing");
//! table.add_column(Column::input("region").with_input_type_ref("string")).unwrap();
//! table.add_row(Row::body("r1")).unwrap();
//! table.set_text("r1", "region", "\"north\"").unwrap();
//!
//! let mut cells = ComplexCells::new(TableRegistry::new(table), EditorOptions::default());
//! cells.activate_simple_mode();
//!
//! let key = CellKey::new("r1", "region");
//! cells.open(&key);
//! let form = cells.overlay_mut(&key).and_then(|o| o.string_form_mut()).unwrap();
//! form.input("south");
//! form.commit_input();
//! cells.close(&key);
//!
//! assert_eq!(
//!     cells.grid().table().text("r1", "region"),
//!     Some("\"north\", \"south\"")
//! );
//! ```

pub mod editors;
pub mod event;
pub mod host;
pub mod options;
pub mod overlay;
pub mod prelude;
pub mod registry;

pub use editors::{
    ComplexEditor, DateView, EditorContext, NumberEdit, NumberField, NumberForm, StringEdit,
    StringForm, Visibility,
};
pub use event::{Event, EventBus, Registration, SubscriptionId, Topic};
pub use host::ComplexCells;
pub use options::EditorOptions;
pub use overlay::{NumberTemplate, Offset, Overlay, StringTemplate, Template};
pub use registry::{ElementRegistry, Graphics, Grid, Modeling, TableRegistry};

// Re-export core types
pub use dmn_cells_core::{
    CellContent, CellKey, CellRef, Column, ColumnKind, DecisionTable, Error, InputExpression,
    Result, Row, RowKind,
};

// Re-export expression types
pub use dmn_cells_feel::{
    classify, format_date, format_number, format_string, is_valid_display_format,
    parse_allowed_values, parse_date, parse_number, parse_string, render_date, DataType,
    DateDisplay, DateKind, EditingType, NumberComparison, NumberRange, Operator, ParsedDate,
    ParsedNumber, ParsedString, StringKind,
};
