//! Collaborators the editors work against
//!
//! - [`ElementRegistry`] enumerates cells and holds their drawn state and overlay slot
//! - [`Modeling`] commits new cell text to the document
//!
//! [`TableRegistry`] implements both over a [`DecisionTable`].

use crate::overlay::Overlay;
use ahash::AHashMap;
use dmn_cells_core::{CellKey, CellRef, DecisionTable, Result};
use dmn_cells_feel::DateDisplay;

/// Drawn state of a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Graphics {
    /// Distance of the cell's left edge from the table's left edge
    pub offset_left: f64,
    /// Cell width
    pub offset_width: f64,
    /// Whether the raw editable text field is shown
    pub raw_field_visible: bool,
    /// Read-only date rendering replacing the raw field
    pub date_content: Option<DateDisplay>,
    /// Suppresses re-rendering on text change while an editor owns presentation
    pub prevent_auto_update: bool,
}

impl Default for Graphics {
    fn default() -> Self {
        Self {
            offset_left: 0.0,
            offset_width: 0.0,
            raw_field_visible: true,
            date_content: None,
            prevent_auto_update: false,
        }
    }
}

impl Graphics {
    /// Right edge of the cell
    pub fn right(&self) -> f64 {
        self.offset_left + self.offset_width
    }
}

/// Access to the grid's cells
pub trait ElementRegistry {
    /// Keys of all cells, row by row
    fn cell_keys(&self) -> Vec<CellKey>;

    /// A cell with its row and column
    fn cell(&self, key: &CellKey) -> Option<CellRef<'_>>;

    /// Drawn state of a cell
    fn graphics(&self, key: &CellKey) -> Option<&Graphics>;

    fn graphics_mut(&mut self, key: &CellKey) -> Option<&mut Graphics>;

    /// Overlay attached to a cell
    fn complex(&self, key: &CellKey) -> Option<&Overlay>;

    fn complex_mut(&mut self, key: &CellKey) -> Option<&mut Overlay>;

    /// Attach an overlay, returning the one it replaces
    fn set_complex(&mut self, key: &CellKey, overlay: Overlay) -> Option<Overlay>;

    /// Detach the overlay of a cell
    fn take_complex(&mut self, key: &CellKey) -> Option<Overlay>;
}

/// Commits cell text to the document
pub trait Modeling {
    fn edit_cell(&mut self, row: &str, column: &str, text: &str) -> Result<()>;
}

/// Everything the editors need from the grid
pub trait Grid: ElementRegistry + Modeling {}

impl<T: ElementRegistry + Modeling> Grid for T {}

#[derive(Debug, Default)]
struct Element {
    graphics: Graphics,
    complex: Option<Overlay>,
}

/// Default column width used for layout
pub const DEFAULT_COLUMN_WIDTH: f64 = 150.0;

/// In-memory registry over a decision table
///
/// Cells are laid out in fixed-width columns. Call [`TableRegistry::sync`]
/// after adding or removing rows and columns through
/// [`TableRegistry::table_mut`].
#[derive(Debug)]
pub struct TableRegistry {
    table: DecisionTable,
    elements: AHashMap<CellKey, Element>,
    column_width: f64,
}

impl TableRegistry {
    pub fn new(table: DecisionTable) -> Self {
        Self::with_column_width(table, DEFAULT_COLUMN_WIDTH)
    }

    pub fn with_column_width(table: DecisionTable, column_width: f64) -> Self {
        let mut registry = Self {
            table,
            elements: AHashMap::new(),
            column_width,
        };
        registry.sync();
        registry
    }

    /// The underlying document
    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    /// Mutable document access; follow structural changes with [`Self::sync`]
    pub fn table_mut(&mut self) -> &mut DecisionTable {
        &mut self.table
    }

    /// Consume the registry, returning the document
    pub fn into_table(self) -> DecisionTable {
        self.table
    }

    /// Create elements for new cells, drop elements of removed cells and
    /// recompute the layout
    pub fn sync(&mut self) {
        let keys = self.table.cell_keys();
        self.elements.retain(|key, _| keys.contains(key));

        let positions: AHashMap<&str, usize> = self
            .table
            .columns()
            .enumerate()
            .map(|(index, column)| (column.id.as_str(), index))
            .collect();

        for key in &keys {
            let index = positions.get(key.column.as_str()).copied().unwrap_or(0);
            let graphics = &mut self.elements.entry(key.clone()).or_default().graphics;
            graphics.offset_left = index as f64 * self.column_width;
            graphics.offset_width = self.column_width;
        }
    }

    /// Number of overlays currently attached
    pub fn overlay_count(&self) -> usize {
        self.elements
            .values()
            .filter(|element| element.complex.is_some())
            .count()
    }
}

impl ElementRegistry for TableRegistry {
    fn cell_keys(&self) -> Vec<CellKey> {
        self.table.cell_keys()
    }

    fn cell(&self, key: &CellKey) -> Option<CellRef<'_>> {
        self.table.cell_by_key(key)
    }

    fn graphics(&self, key: &CellKey) -> Option<&Graphics> {
        self.elements.get(key).map(|element| &element.graphics)
    }

    fn graphics_mut(&mut self, key: &CellKey) -> Option<&mut Graphics> {
        self.elements.get_mut(key).map(|element| &mut element.graphics)
    }

    fn complex(&self, key: &CellKey) -> Option<&Overlay> {
        self.elements.get(key)?.complex.as_ref()
    }

    fn complex_mut(&mut self, key: &CellKey) -> Option<&mut Overlay> {
        self.elements.get_mut(key)?.complex.as_mut()
    }

    fn set_complex(&mut self, key: &CellKey, overlay: Overlay) -> Option<Overlay> {
        match self.elements.get_mut(key) {
            Some(element) => element.complex.replace(overlay),
            None => {
                tracing::warn!("cannot attach overlay to unknown cell {key}");
                None
            }
        }
    }

    fn take_complex(&mut self, key: &CellKey) -> Option<Overlay> {
        self.elements.get_mut(key)?.complex.take()
    }
}

impl Modeling for TableRegistry {
    fn edit_cell(&mut self, row: &str, column: &str, text: &str) -> Result<()> {
        self.table.set_text(row, column, text)
    }
}
