//! Overlay slot of a cell
//!
//! A cell holds at most one [`Overlay`]. The template is a tagged union
//! keyed by the owning editor, so an editor only ever touches overlays of
//! its own data type.

use crate::editors::number::NumberForm;
use crate::editors::string::StringForm;
use dmn_cells_core::CellKey;
use dmn_cells_feel::DataType;

/// Pixel offset of an overlay relative to its anchor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// Number overlay content
#[derive(Debug, Clone, PartialEq)]
pub enum NumberTemplate {
    /// Masks text the number editor cannot edit; never commits
    Blank,
    Form(NumberForm),
}

/// String overlay content
#[derive(Debug, Clone, PartialEq)]
pub enum StringTemplate {
    /// Masks a foreign expression; never commits
    Blank,
    Form(StringForm),
}

/// Overlay content, keyed by owning editor
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Number(NumberTemplate),
    String(StringTemplate),
}

/// A structured editor layered over a cell
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Target cell
    pub cell: CellKey,
    /// CSS class of the overlay container
    pub class_name: Option<&'static str>,
    /// Offset relative to the anchor
    pub offset: Offset,
    /// Horizontal position, set when the overlay is opened
    pub left: Option<f64>,
    /// Whether the overlay is currently shown
    pub is_open: bool,
    /// Editor content
    pub template: Template,
}

impl Overlay {
    pub fn new(cell: CellKey, template: Template) -> Self {
        Self {
            cell,
            class_name: None,
            offset: Offset::default(),
            left: None,
            is_open: false,
            template,
        }
    }

    /// Set the container class
    pub fn with_class_name(mut self, class_name: &'static str) -> Self {
        self.class_name = Some(class_name);
        self
    }

    /// Editor owning this overlay
    pub fn owner(&self) -> DataType {
        match self.template {
            Template::Number(_) => DataType::Number,
            Template::String(_) => DataType::String,
        }
    }

    /// Whether the overlay only masks the cell
    pub fn is_blank(&self) -> bool {
        matches!(
            self.template,
            Template::Number(NumberTemplate::Blank) | Template::String(StringTemplate::Blank)
        )
    }

    /// Number form, if this is a non-blank number overlay
    pub fn number_form(&self) -> Option<&NumberForm> {
        match &self.template {
            Template::Number(NumberTemplate::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn number_form_mut(&mut self) -> Option<&mut NumberForm> {
        match &mut self.template {
            Template::Number(NumberTemplate::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// String form, if this is a non-blank string overlay
    pub fn string_form(&self) -> Option<&StringForm> {
        match &self.template {
            Template::String(StringTemplate::Form(form)) => Some(form),
            _ => None,
        }
    }

    pub fn string_form_mut(&mut self) -> Option<&mut StringForm> {
        match &mut self.template {
            Template::String(StringTemplate::Form(form)) => Some(form),
            _ => None,
        }
    }
}
