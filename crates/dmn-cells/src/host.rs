//! Notification dispatch and editor lifecycle

use crate::editors::{ComplexEditor, DateView, EditorContext, NumberEdit, StringEdit};
use crate::event::{Event, EventBus};
use crate::options::EditorOptions;
use crate::overlay::Overlay;
use crate::registry::Grid;
use dmn_cells_core::CellKey;
use dmn_cells_feel::DataType;
use std::collections::VecDeque;

/// Hosts the cell editors over a grid
///
/// Notifications are delivered synchronously, one at a time, to every
/// subscriber in registration order. Notifications raised while handling
/// one (cell renders, mostly) are queued and delivered after it.
///
/// # Example
///
/// ```rust
/// use dmn_cells::prelude::*;
///
/// let mut table = DecisionTable::new("discount");
/// table.add_column(Column::input("amount").with_input_type_ref("number")).unwrap();
/// table.add_row(Row::body("r1")).unwrap();
/// table.set_text("r1", "amount", ">= 5").unwrap();
///
/// let mut cells = ComplexCells::new(TableRegistry::new(table), EditorOptions::default());
/// cells.activate_simple_mode();
///
/// let key = CellKey::new("r1", "amount");
/// let form = cells.overlay(&key).and_then(|o| o.number_form()).unwrap();
/// assert_eq!(form.operator_index(), 4);
///
/// cells.open(&key);
/// cells.close(&key);
/// assert_eq!(cells.grid().table().text("r1", "amount"), Some(">= 5"));
/// ```
pub struct ComplexCells<G: Grid> {
    grid: G,
    bus: EventBus,
    editors: Vec<Box<dyn ComplexEditor>>,
    simple_mode: bool,
    options: EditorOptions,
    queue: VecDeque<Event>,
    open_cell: Option<CellKey>,
}

impl<G: Grid> ComplexCells<G> {
    /// Register the enabled editors over a grid (advanced mode)
    pub fn new(grid: G, options: EditorOptions) -> Self {
        let mut editors: Vec<Box<dyn ComplexEditor>> = Vec::new();
        if options.is_enabled(DataType::Date) {
            editors.push(Box::new(DateView::new()));
        }
        if options.is_enabled(DataType::Number) {
            editors.push(Box::new(NumberEdit::new()));
        }
        if options.is_enabled(DataType::String) {
            editors.push(Box::new(StringEdit::new()));
        }

        let mut bus = EventBus::new();
        for editor in &mut editors {
            let registration = bus.subscribe(editor.data_type(), editor.topics());
            *editor.registration_mut() = registration;
        }
        tracing::debug!(
            "registered {} editors with {} subscriptions",
            editors.len(),
            bus.listener_count()
        );

        Self {
            grid,
            bus,
            editors,
            simple_mode: false,
            options,
            queue: VecDeque::new(),
            open_cell: None,
        }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// Mutable grid access; notify the editors of structural changes
    pub fn grid_mut(&mut self) -> &mut G {
        &mut self.grid
    }

    pub fn into_grid(self) -> G {
        self.grid
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn is_simple_mode(&self) -> bool {
        self.simple_mode
    }

    /// Data types with a registered editor, in registration order
    pub fn editor_types(&self) -> Vec<DataType> {
        self.editors.iter().map(|e| e.data_type()).collect()
    }

    /// Switch to simple mode and redraw every cell
    pub fn activate_simple_mode(&mut self) {
        if self.simple_mode {
            return;
        }
        self.simple_mode = true;
        self.notify(Event::SimpleModeActivated);
        self.redraw();
    }

    /// Switch to advanced mode and redraw every cell
    ///
    /// An open overlay is closed (and committed) first.
    pub fn deactivate_simple_mode(&mut self) {
        if !self.simple_mode {
            return;
        }
        if let Some(cell) = self.open_cell.clone() {
            self.close(&cell);
        }
        self.simple_mode = false;
        self.notify(Event::SimpleModeDeactivated);
        self.redraw();
    }

    /// Deliver a notification, then everything it triggered
    pub fn notify(&mut self, event: Event) {
        self.queue.push_back(event);
        self.drain();
    }

    /// Deliver queued notifications
    ///
    /// A refresh may replace the open overlay with a closed one; the open
    /// cell is forgotten once its overlay is no longer open.
    fn drain(&mut self) {
        while let Some(event) = self.queue.pop_front() {
            self.dispatch(&event);
        }

        let stale = self
            .open_cell
            .as_ref()
            .is_some_and(|cell| !self.grid.complex(cell).is_some_and(|o| o.is_open));
        if stale {
            tracing::debug!("overlay of open cell was rebuilt, it is no longer open");
            self.open_cell = None;
        }
    }

    fn dispatch(&mut self, event: &Event) {
        let subscribers = self.bus.subscribers(event.topic());
        if subscribers.is_empty() {
            tracing::trace!("no subscribers for {}", event.topic());
            return;
        }

        for owner in subscribers {
            let Some(editor) = self.editors.iter_mut().find(|e| e.data_type() == owner) else {
                continue;
            };
            let mut ctx = EditorContext {
                grid: &mut self.grid,
                simple_mode: self.simple_mode,
                options: &self.options,
                pending: &mut self.queue,
            };
            editor.handle(event, &mut ctx);
        }
    }

    /// Redraw every cell
    pub fn redraw(&mut self) {
        for cell in self.grid.cell_keys() {
            self.queue.push_back(Event::CellRender { cell });
        }
        self.drain();
    }

    /// Open the overlay of a cell, closing any other open overlay
    ///
    /// Returns `false` if the cell has no overlay.
    pub fn open(&mut self, cell: &CellKey) -> bool {
        if self.grid.complex(cell).is_none() {
            return false;
        }
        if let Some(previous) = self.open_cell.clone() {
            let still_open = self.grid.complex(cell).is_some_and(|o| o.is_open);
            if &previous == cell && still_open {
                return true;
            }
            self.close(&previous);
        }

        self.notify(Event::ComplexCellOpen { cell: cell.clone() });
        self.open_cell = Some(cell.clone());
        true
    }

    /// Close the overlay of a cell, committing its state
    ///
    /// Returns `false` if the cell has no open overlay.
    pub fn close(&mut self, cell: &CellKey) -> bool {
        if self.open_cell.as_ref() == Some(cell) {
            self.open_cell = None;
        }
        let is_open = self.grid.complex(cell).is_some_and(|o| o.is_open);
        if !is_open {
            return false;
        }

        self.notify(Event::ComplexCellClose { cell: cell.clone() });
        true
    }

    /// Cell whose overlay is open
    pub fn open_cell(&self) -> Option<&CellKey> {
        self.open_cell.as_ref()
    }

    /// Overlay attached to a cell
    pub fn overlay(&self, cell: &CellKey) -> Option<&Overlay> {
        self.grid.complex(cell)
    }

    /// Mutable overlay access, for driving a form
    pub fn overlay_mut(&mut self, cell: &CellKey) -> Option<&mut Overlay> {
        self.grid.complex_mut(cell)
    }

    /// Tear an editor down and release its subscriptions
    ///
    /// Returns `false` if no editor of that type is registered.
    pub fn remove_editor(&mut self, data_type: DataType) -> bool {
        let Some(index) = self.editors.iter().position(|e| e.data_type() == data_type) else {
            return false;
        };
        let mut editor = self.editors.remove(index);

        let mut ctx = EditorContext {
            grid: &mut self.grid,
            simple_mode: self.simple_mode,
            options: &self.options,
            pending: &mut self.queue,
        };
        editor.teardown(&mut ctx);
        let released = editor.registration_mut().release(&mut self.bus);
        tracing::debug!("{data_type} editor removed, released {released} subscriptions");

        self.drain();
        true
    }

    /// Number of live subscriptions
    pub fn subscription_count(&self) -> usize {
        self.bus.listener_count()
    }
}
