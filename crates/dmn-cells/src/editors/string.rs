//! String editor
//!
//! String cells are edited as a list of values, either typed freely
//! (comma separated, committed with Enter) or picked from the values the
//! column declares. The two entry modes never coexist on one form.

use super::{ComplexEditor, EditorContext};
use crate::event::{Event, Registration, Topic};
use crate::overlay::{Overlay, StringTemplate, Template};
use dmn_cells_core::CellKey;
use dmn_cells_feel::string::{is_valid_free_input, split_free_input};
use dmn_cells_feel::{format_string, parse_allowed_values, parse_string, DataType, ParsedString, StringKind};

/// Container class of string overlays
pub const CLASS_NAME: &str = "dmn-string-editor";

/// Help text shown while the free input holds a quote
pub const INVALID_INPUT_HELP: &str = "Values must not contain quotes";

const TOPICS: &[Topic] = &[
    Topic::SimpleModeActivated,
    Topic::SimpleModeDeactivated,
    Topic::DataTypeEdited,
    Topic::AllowedValuesEdited,
    Topic::ContentNodeCreated,
    Topic::ComplexCellOpen,
    Topic::ComplexCellClose,
];

/// Which value sections of the form are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Visibility {
    /// Picklist of declared values
    pub input_values: bool,
    /// Free text entry with the value chips
    pub free_input: bool,
}

/// State of a string overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringForm {
    /// Kind and values being edited
    pub parsed: ParsedString,
    /// Values declared by the column, if any
    pub allowed_values: Option<Vec<String>>,
    /// Current free input text
    pub input: String,
    /// Whether the free input is flagged invalid
    pub invalid: bool,
}

impl StringForm {
    pub fn new(parsed: ParsedString, allowed_values: Option<Vec<String>>) -> Self {
        Self {
            parsed,
            allowed_values,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> StringKind {
        self.parsed.kind
    }

    pub fn values(&self) -> &[String] {
        &self.parsed.values
    }

    /// Change the kind from the dropdown
    pub fn set_kind(&mut self, kind: StringKind) {
        self.parsed.kind = kind;
    }

    pub fn visibility(&self) -> Visibility {
        if self.parsed.kind == StringKind::Empty {
            return Visibility::default();
        }
        let declared = self.allowed_values.is_some();
        Visibility {
            input_values: declared,
            free_input: !declared,
        }
    }

    /// Update the free input, flagging text that contains a quote
    pub fn input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.invalid = !is_valid_free_input(&self.input);
    }

    pub fn help_visible(&self) -> bool {
        self.invalid
    }

    /// Enter in the free input: append its values and clear it
    ///
    /// Ignored when the column declares its values or the input holds a
    /// quote. Returns whether anything was committed.
    pub fn commit_input(&mut self) -> bool {
        if self.allowed_values.is_some() {
            return false;
        }
        let Some(values) = split_free_input(&self.input) else {
            return false;
        };

        for value in values {
            self.parsed.push(value);
        }
        self.input.clear();
        self.invalid = false;
        true
    }

    /// Remove a value chip
    pub fn remove_value(&mut self, value: &str) -> bool {
        self.parsed.remove(value)
    }

    /// Select or deselect a declared value
    ///
    /// Selected values follow the declared order. Returns `false` for a
    /// value the column does not declare.
    pub fn toggle_allowed(&mut self, value: &str) -> bool {
        let Some(allowed) = &self.allowed_values else {
            return false;
        };
        if !allowed.iter().any(|v| v == value) {
            return false;
        }

        if !self.parsed.remove(value) {
            self.parsed.push(value);
            self.parsed
                .values
                .sort_by_key(|v| allowed.iter().position(|a| a == v).unwrap_or(usize::MAX));
        }
        true
    }

    /// Cell text for the form
    pub fn serialize(&self) -> String {
        format_string(&self.parsed)
    }
}

/// String editor controller
#[derive(Debug, Default)]
pub struct StringEdit {
    registration: Registration,
}

impl StringEdit {
    pub fn new() -> Self {
        Self::default()
    }

    fn setup(&mut self, ctx: &mut EditorContext<'_>) {
        let cells = ctx.cells_of_type(DataType::String);
        let count = cells.len();
        for (key, text) in cells {
            let allowed = ctx
                .grid
                .cell(&key)
                .and_then(|cell| parse_allowed_values(cell.column));

            let template = match parse_string(&text) {
                Some(parsed) => StringTemplate::Form(StringForm::new(parsed, allowed)),
                None => StringTemplate::Blank,
            };
            let overlay =
                Overlay::new(key, Template::String(template)).with_class_name(CLASS_NAME);
            ctx.attach(DataType::String, overlay);
        }
        tracing::debug!("string editor attached {count} overlays");
    }

    fn refresh(&mut self, ctx: &mut EditorContext<'_>) {
        if ctx.is_simple_mode() {
            self.teardown(ctx);
            self.setup(ctx);
        }
    }

    fn open(&mut self, cell: &CellKey, ctx: &mut EditorContext<'_>) {
        let left = ctx.overlay_left(cell);
        if let Some(overlay) = ctx.owned_overlay_mut(DataType::String, cell) {
            overlay.left = left;
            overlay.is_open = true;
        }
    }

    fn close(&mut self, cell: &CellKey, ctx: &mut EditorContext<'_>) {
        let Some(overlay) = ctx.owned_overlay_mut(DataType::String, cell) else {
            return;
        };
        overlay.is_open = false;
        let text = overlay.string_form().map(StringForm::serialize);

        if let Some(text) = text {
            ctx.commit(cell, &text);
        }
    }
}

impl ComplexEditor for StringEdit {
    fn data_type(&self) -> DataType {
        DataType::String
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
            Event::DataTypeEdited | Event::AllowedValuesEdited | Event::ContentNodeCreated => {
                self.refresh(ctx)
            }
            Event::ComplexCellOpen { cell } => self.open(cell, ctx),
            Event::ComplexCellClose { cell } => self.close(cell, ctx),
            Event::CellRender { .. } => {}
        }
    }

    fn teardown(&mut self, ctx: &mut EditorContext<'_>) {
        let removed = ctx.detach_all(DataType::String);
        tracing::debug!("string editor removed {removed} overlays");
    }
}
