//! Per-type cell editors
//!
//! Each editor subscribes to the notifications it needs, classifies cells
//! with [`dmn_cells_feel::classify`] and only touches cells of its own type.

pub mod date;
pub mod number;
pub mod string;

use crate::event::{Event, Registration, Topic};
use crate::options::EditorOptions;
use crate::overlay::Overlay;
use crate::registry::Grid;
use dmn_cells_core::CellKey;
use dmn_cells_feel::{classify, DataType};
use std::collections::VecDeque;

pub use date::DateView;
pub use number::{NumberEdit, NumberField, NumberForm};
pub use string::{StringEdit, StringForm, Visibility};

/// What an editor sees while handling a notification
pub struct EditorContext<'a> {
    pub(crate) grid: &'a mut dyn Grid,
    pub(crate) simple_mode: bool,
    pub(crate) options: &'a EditorOptions,
    pub(crate) pending: &'a mut VecDeque<Event>,
}

impl<'a> EditorContext<'a> {
    pub fn grid(&self) -> &dyn Grid {
        &*self.grid
    }

    pub fn grid_mut(&mut self) -> &mut dyn Grid {
        &mut *self.grid
    }

    /// Whether simple mode is active
    pub fn is_simple_mode(&self) -> bool {
        self.simple_mode
    }

    pub fn options(&self) -> &EditorOptions {
        self.options
    }

    /// Request a redraw of a cell (delivered after the current notification)
    pub fn update(&mut self, cell: &CellKey) {
        self.pending
            .push_back(Event::CellRender { cell: cell.clone() });
    }

    /// Commit text to a cell and redraw it; `false` if the grid refused
    pub fn commit(&mut self, cell: &CellKey, text: &str) -> bool {
        match self.grid.edit_cell(&cell.row, &cell.column, text) {
            Ok(()) => {
                tracing::debug!("committed {text:?} to {cell}");
                self.update(cell);
                true
            }
            Err(e) => {
                tracing::warn!("failed to commit {text:?} to {cell}: {e}");
                false
            }
        }
    }

    /// Cells of a data type, with their current text
    pub fn cells_of_type(&self, data_type: DataType) -> Vec<(CellKey, String)> {
        self.grid
            .cell_keys()
            .into_iter()
            .filter_map(|key| {
                let cell = self.grid.cell(&key)?;
                (classify(&cell) == Some(data_type)).then(|| (key.clone(), cell.text().to_string()))
            })
            .collect()
    }

    /// Where an overlay opened on a cell is placed horizontally
    pub fn overlay_left(&self, cell: &CellKey) -> Option<f64> {
        self.grid
            .graphics(cell)
            .map(|graphics| graphics.right() - self.options.overlay_inset)
    }

    /// Attach an overlay owned by `data_type`, replacing whatever was there
    pub fn attach(&mut self, data_type: DataType, overlay: Overlay) {
        let cell = overlay.cell.clone();
        if let Some(previous) = self.grid.set_complex(&cell, overlay) {
            if previous.owner() != data_type {
                tracing::debug!(
                    "{data_type} overlay replaced a stale {} overlay on {cell}",
                    previous.owner()
                );
            }
        }
        self.update(&cell);
    }

    /// Detach every overlay owned by `data_type`; returns how many were removed
    pub fn detach_all(&mut self, data_type: DataType) -> usize {
        let mut removed = 0;
        for key in self.grid.cell_keys() {
            let owned = self
                .grid
                .complex(&key)
                .is_some_and(|overlay| overlay.owner() == data_type);
            if owned {
                self.grid.take_complex(&key);
                self.update(&key);
                removed += 1;
            }
        }
        removed
    }

    /// The overlay on a cell if `data_type` owns it
    pub fn owned_overlay_mut(&mut self, data_type: DataType, cell: &CellKey) -> Option<&mut Overlay> {
        self.grid
            .complex_mut(cell)
            .filter(|overlay| overlay.owner() == data_type)
    }
}

/// A structured editor for one data type
pub trait ComplexEditor {
    /// Data type this editor owns
    fn data_type(&self) -> DataType;

    /// Topics the editor listens to
    fn topics(&self) -> &'static [Topic];

    /// Subscriptions held by the editor
    fn registration_mut(&mut self) -> &mut Registration;

    /// Handle one notification
    fn handle(&mut self, event: &Event, ctx: &mut EditorContext<'_>);

    /// Remove everything the editor attached to the grid
    fn teardown(&mut self, ctx: &mut EditorContext<'_>);
}
