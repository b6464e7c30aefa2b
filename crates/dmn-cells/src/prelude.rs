//! Prelude module - common imports for dmn-cells users
//!
//! ```rust
//! use dmn_cells::prelude::*;
//! ```

pub use crate::{
    // Document types
    CellKey,
    Column,
    // Host and options
    ComplexCells,
    DataType,
    DecisionTable,
    EditingType,
    EditorOptions,
    // Collaborator traits
    ElementRegistry,
    Error,
    Event,
    Modeling,
    Operator,
    Overlay,
    Result,
    Row,
    StringKind,
    TableRegistry,
};
