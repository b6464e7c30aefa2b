//! Editor options
//!
//! # Example
//!
//! ```rust
//! use dmn_cells::EditorOptions;
//!
//! let options = EditorOptions::default()
//!     .with_overlay_inset(4.0)
//!     .with_date_display_format("%Y-%m-%d %H:%M");
//! assert!(options.number);
//! ```

use dmn_cells_feel::date::DISPLAY_FORMAT;
use dmn_cells_feel::DataType;

/// Options for the structured cell editors
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EditorOptions {
    /// Pixels subtracted from the cell's right edge when positioning an overlay (default: 10)
    pub overlay_inset: f64,
    /// chrono format for rendered dates (default: `%a, %d %b %Y %H:%M`)
    pub date_display_format: String,
    /// Text shown for empty date cells (default: `-`)
    pub date_placeholder: String,
    /// Enable the date view
    pub date: bool,
    /// Enable the number editor
    pub number: bool,
    /// Enable the string editor
    pub string: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            overlay_inset: 10.0,
            date_display_format: DISPLAY_FORMAT.to_string(),
            date_placeholder: "-".to_string(),
            date: true,
            number: true,
            string: true,
        }
    }
}

impl EditorOptions {
    /// Set the overlay inset
    pub fn with_overlay_inset(mut self, inset: f64) -> Self {
        self.overlay_inset = inset;
        self
    }

    /// Set the date display format
    pub fn with_date_display_format(mut self, format: impl Into<String>) -> Self {
        self.date_display_format = format.into();
        self
    }

    /// Set the empty date placeholder
    pub fn with_date_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.date_placeholder = placeholder.into();
        self
    }

    /// Enable or disable the editor for a data type
    pub fn with_editor(mut self, data_type: DataType, enabled: bool) -> Self {
        match data_type {
            DataType::Date => self.date = enabled,
            DataType::Number => self.number = enabled,
            DataType::String => self.string = enabled,
        }
        self
    }

    /// Whether the editor for a data type is enabled
    pub fn is_enabled(&self, data_type: DataType) -> bool {
        match data_type {
            DataType::Date => self.date,
            DataType::Number => self.number,
            DataType::String => self.string,
        }
    }
}
