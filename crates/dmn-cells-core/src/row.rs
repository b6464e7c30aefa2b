//! Row types

/// Where a row sits in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowKind {
    /// Header row (labels, type row, input expressions)
    Head,
    /// Rule row carrying editable entries
    Body,
    /// Footer row (e.g. "add rule" controls)
    Foot,
}

/// Row metadata
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    /// Row id (the rule id for body rows)
    pub id: String,
    /// Head, body or foot
    pub kind: RowKind,
}

impl Row {
    /// Create a new row
    pub fn new(id: impl Into<String>, kind: RowKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Create a body (rule) row
    pub fn body(id: impl Into<String>) -> Self {
        Self::new(id, RowKind::Body)
    }

    /// Create a header row
    pub fn head(id: impl Into<String>) -> Self {
        Self::new(id, RowKind::Head)
    }

    /// Create a footer row
    pub fn foot(id: impl Into<String>) -> Self {
        Self::new(id, RowKind::Foot)
    }

    /// Whether this is a data row (neither header nor footer)
    pub fn is_body(&self) -> bool {
        self.kind == RowKind::Body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_detection() {
        assert!(Row::body("r1").is_body());
        assert!(!Row::head("h").is_body());
        assert!(!Row::foot("f").is_body());
    }
}
