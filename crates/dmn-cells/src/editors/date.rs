//! Read-only date rendering
//!
//! In simple mode a date cell's raw field is replaced by a rendered span
//! (see [`render_date`]). The view is re-evaluated on every cell render.

use super::{ComplexEditor, EditorContext};
use crate::event::{Event, Registration, Topic};
use dmn_cells_core::CellKey;
use dmn_cells_feel::{classify, render_date, DataType};

const TOPICS: &[Topic] = &[Topic::CellRender];

/// Date view controller
#[derive(Debug, Default)]
pub struct DateView {
    registration: Registration,
}

impl DateView {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(&self, cell: &CellKey, ctx: &mut EditorContext<'_>) {
        let Some(cell_ref) = ctx.grid.cell(cell) else {
            tracing::trace!("render of unknown cell {cell}");
            return;
        };

        if classify(&cell_ref) != Some(DataType::Date) {
            // column type changed away from date; drop a stale span
            let Some(graphics) = ctx.grid.graphics_mut(cell) else {
                return;
            };
            if graphics.date_content.take().is_some() {
                graphics.raw_field_visible = true;
                graphics.prevent_auto_update = false;
            }
            return;
        }

        let display = ctx
            .simple_mode
            .then(|| render_date(cell_ref.content, &ctx.options.date_display_format));

        let Some(graphics) = ctx.grid.graphics_mut(cell) else {
            return;
        };
        match display {
            Some(display) => {
                graphics.raw_field_visible = false;
                graphics.prevent_auto_update = true;
                graphics.date_content = Some(display);
            }
            None => {
                graphics.raw_field_visible = true;
                graphics.prevent_auto_update = false;
                graphics.date_content = None;
            }
        }
    }
}

impl ComplexEditor for DateView {
    fn data_type(&self) -> DataType {
        DataType::Date
    }

    fn topics(&self) -> &'static [Topic] {
        TOPICS
    }

    fn registration_mut(&mut self) -> &mut Registration {
        &mut self.registration
    }

    fn handle(&mut self, event: &Event, ctx: &mut EditorContext<'_>) {
        if let Event::CellRender { cell } = event {
            self.render(cell, ctx);
        }
    }

    fn teardown(&mut self, ctx: &mut EditorContext<'_>) {
        let mut restored = 0;
        for key in ctx.grid.cell_keys() {
            let Some(graphics) = ctx.grid.graphics_mut(&key) else {
                continue;
            };
            if graphics.date_content.take().is_some() {
                graphics.raw_field_visible = true;
                graphics.prevent_auto_update = false;
                restored += 1;
            }
        }
        tracing::debug!("date view removed, restored {restored} cells");
    }
}
