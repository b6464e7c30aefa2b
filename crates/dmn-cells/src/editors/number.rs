//! Number editor
//!
//! Attaches a comparison/range form to every number cell while simple mode
//! is active. Closing an overlay commits the serialized form.

use super::{ComplexEditor, EditorContext};
use crate::event::{Event, Registration, Topic};
use crate::overlay::{NumberTemplate, Overlay, Template};
use dmn_cells_core::CellKey;
use dmn_cells_feel::number::{format_comparison, format_range};
use dmn_cells_feel::{
    parse_number, DataType, EditingType, NumberComparison, NumberRange, Operator, ParsedNumber,
};

/// Container class of number overlays
pub const CLASS_NAME: &str = "dmn-number-editor";

const TOPICS: &[Topic] = &[
    Topic::SimpleModeActivated,
    Topic::SimpleModeDeactivated,
    Topic::DataTypeEdited,
    Topic::ComplexCellOpen,
    Topic::ComplexCellClose,
];

/// Input of the number form that receives focus on open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    Operand,
    Start,
}

/// State of a number overlay
#[derive(Debug, Clone, PartialEq)]
pub struct NumberForm {
    /// Active sub-mode
    pub editing_type: EditingType,
    /// Comparison inputs
    pub comparison: NumberComparison,
    /// Range inputs
    pub range: NumberRange,
    /// Focused input
    pub focus: Option<NumberField>,
}

impl Default for NumberForm {
    fn default() -> Self {
        Self {
            editing_type: EditingType::Comparison,
            comparison: NumberComparison::default(),
            range: NumberRange::default(),
            focus: None,
        }
    }
}

impl NumberForm {
    /// Form for cell text; `None` if the text is not editable as a number
    pub fn from_text(text: &str) -> Option<Self> {
        let mut form = Self::default();
        form.load(text).then_some(form)
    }

    /// Re-derive the form from cell text
    ///
    /// Returns `false` (leaving the form untouched) if the text is not
    /// editable as a number.
    pub fn load(&mut self, text: &str) -> bool {
        let Some(parsed) = parse_number(text) else {
            return false;
        };

        self.editing_type = parsed.editing_type();
        match parsed {
            ParsedNumber::Comparison(comparison) => {
                self.comparison = comparison;
                self.range = NumberRange::default();
            }
            ParsedNumber::Range(range) => {
                self.comparison = NumberComparison::default();
                self.range = range;
            }
        }
        true
    }

    /// Switch to comparison entry, discarding range inputs
    pub fn use_comparison(&mut self) {
        if self.editing_type != EditingType::Comparison {
            self.editing_type = EditingType::Comparison;
            self.range = NumberRange::default();
            self.focus = Some(NumberField::Operand);
        }
    }

    /// Switch to range entry, discarding comparison inputs
    pub fn use_range(&mut self) {
        if self.editing_type != EditingType::Range {
            self.editing_type = EditingType::Range;
            self.comparison = NumberComparison::default();
            self.focus = Some(NumberField::Start);
        }
    }

    pub fn set_operator(&mut self, operator: Operator) {
        self.comparison.operator = operator;
    }

    /// Select the operator by its dropdown position
    pub fn set_operator_index(&mut self, index: usize) -> bool {
        match Operator::from_index(index) {
            Some(operator) => {
                self.set_operator(operator);
                true
            }
            None => false,
        }
    }

    /// Dropdown position of the selected operator
    pub fn operator_index(&self) -> usize {
        self.comparison.operator.index()
    }

    pub fn set_operand(&mut self, operand: impl Into<String>) {
        self.comparison.operand = operand.into();
    }

    pub fn set_start(&mut self, start: impl Into<String>, inclusive: bool) {
        self.range.start = start.into();
        self.range.start_inclusive = inclusive;
    }

    pub fn set_end(&mut self, end: impl Into<String>, inclusive: bool) {
        self.range.end = end.into();
        self.range.end_inclusive = inclusive;
    }

    /// Cell text for the active sub-mode
    pub fn serialize(&self) -> String {
        match self.editing_type {
            EditingType::Comparison => format_comparison(&self.comparison),
            EditingType::Range => format_range(&self.range),
        }
    }
}

/// Number editor controller
#[derive(Debug, Default)]
pub struct NumberEdit {
    registration: Registration,
}

impl NumberEdit {
    pub fn new() -> Self {
        Self::default()
    }

    fn template(text: &str) -> NumberTemplate {
        match NumberForm::from_text(text) {
            Some(form) => NumberTemplate::Form(form),
            None => {
                tracing::trace!("number text {text:?} is not editable, masking it");
                NumberTemplate::Blank
            }
        }
    }

    fn setup(&mut self, ctx: &mut EditorContext<'_>) {
        let cells = ctx.cells_of_type(DataType::Number);
        let count = cells.len();
        for (key, text) in cells {
            let overlay = Overlay::new(key, Template::Number(Self::template(&text)))
                .with_class_name(CLASS_NAME);
            ctx.attach(DataType::Number, overlay);
        }
        tracing::debug!("number editor attached {count} overlays");
    }

    fn refresh(&mut self, ctx: &mut EditorContext<'_>) {
        if ctx.is_simple_mode() {
            self.teardown(ctx);
            self.setup(ctx);
        }
    }

    fn open(&mut self, cell: &CellKey, ctx: &mut EditorContext<'_>) {
        let left = ctx.overlay_left(cell);
        let Some(text) = ctx.grid.cell(cell).map(|c| c.text().to_string()) else {
            return;
        };
        let Some(overlay) = ctx.owned_overlay_mut(DataType::Number, cell) else {
            return;
        };

        overlay.left = left;
        overlay.is_open = true;
        match NumberForm::from_text(&text) {
            Some(mut form) => {
                form.focus = Some(match form.editing_type {
                    EditingType::Comparison => NumberField::Operand,
                    EditingType::Range => NumberField::Start,
                });
                overlay.template = Template::Number(NumberTemplate::Form(form));
            }
            None => overlay.template = Template::Number(NumberTemplate::Blank),
        }
    }

    fn close(&mut self, cell: &CellKey, ctx: &mut EditorContext<'_>) {
        let Some(overlay) = ctx.owned_overlay_mut(DataType::Number, cell) else {
            return;
        };
        overlay.is_open = false;
        let text = overlay.number_form_mut().map(|form| {
            form.focus = None;
            form.serialize()
        });

        if let Some(text) = text {
            ctx.commit(cell, &text);
        }
    }
}

impl ComplexEditor for NumberEdit {
    fn data_type(&self) -> DataType {
        DataType::Number
    }

    fn topics(&self) -> &'static [Topic] {
        TOPICS
    }

    fn registration_mut(&mut self) -> &mut Registration {
        &mut self.registration
    }

    fn handle(&mut self, event: &Event, ctx: &mut EditorContext<'_>) {
        match event {
            Event::SimpleModeActivated => self.setup(ctx),
            Event::SimpleModeDeactivated => self.teardown(ctx),
            Event::DataTypeEdited => self.refresh(ctx),
            Event::ComplexCellOpen { cell } => self.open(cell, ctx),
            Event::ComplexCellClose { cell } => self.close(cell, ctx),
            _ => {}
        }
    }

    fn teardown(&mut self, ctx: &mut EditorContext<'_>) {
        let removed = ctx.detach_all(DataType::Number);
        tracing::debug!("number editor removed {removed} overlays");
    }
}
