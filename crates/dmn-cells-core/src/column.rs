//! Column types

/// Role of a column in the decision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnKind {
    /// Input clause
    Input,
    /// Output clause
    Output,
    /// Annotation column (free text)
    Annotation,
}

/// The expression an input column tests against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputExpression {
    /// Declared type of the expression (e.g. "date", "string")
    pub type_ref: Option<String>,
    /// Expression text
    pub text: Option<String>,
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Column id (the clause id)
    pub id: String,
    /// Input, output or annotation
    pub kind: ColumnKind,
    /// Display label
    pub label: Option<String>,
    /// Declared type of the column itself
    pub type_ref: Option<String>,
    /// Input expression (input columns only)
    pub input_expression: Option<InputExpression>,
    /// Declared input values (`inputValues` unary tests text)
    pub input_values: Option<String>,
    /// Declared output values (`outputValues` unary tests text)
    pub output_values: Option<String>,
}

impl Column {
    /// Create a new column with no type information
    pub fn new(id: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            id: id.into(),
            kind,
            label: None,
            type_ref: None,
            input_expression: None,
            input_values: None,
            output_values: None,
        }
    }

    /// Create an input column
    pub fn input(id: impl Into<String>) -> Self {
        Self::new(id, ColumnKind::Input)
    }

    /// Create an output column
    pub fn output(id: impl Into<String>) -> Self {
        Self::new(id, ColumnKind::Output)
    }

    /// Create an annotation column
    pub fn annotation(id: impl Into<String>) -> Self {
        Self::new(id, ColumnKind::Annotation)
    }

    /// Set label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the column's own type reference
    pub fn with_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.type_ref = Some(type_ref.into());
        self
    }

    /// Set the input expression's type reference
    pub fn with_input_type_ref(mut self, type_ref: impl Into<String>) -> Self {
        self.input_expression
            .get_or_insert_with(InputExpression::default)
            .type_ref = Some(type_ref.into());
        self
    }

    /// Set declared input values
    pub fn with_input_values(mut self, text: impl Into<String>) -> Self {
        self.input_values = Some(text.into());
        self
    }

    /// Set declared output values
    pub fn with_output_values(mut self, text: impl Into<String>) -> Self {
        self.output_values = Some(text.into());
        self
    }

    /// Type reference of the input expression, if any
    pub fn input_type_ref(&self) -> Option<&str> {
        self.input_expression
            .as_ref()
            .and_then(|expr| expr.type_ref.as_deref())
    }

    /// Declared value list text, input values taking precedence
    ///
    /// Empty declarations count as absent.
    pub fn declared_values(&self) -> Option<&str> {
        self.input_values
            .as_deref()
            .or(self.output_values.as_deref())
            .filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_ref() {
        let column = Column::input("in").with_input_type_ref("date");
        assert_eq!(column.input_type_ref(), Some("date"));
        assert_eq!(column.type_ref, None);

        let column = Column::output("out").with_type_ref("string");
        assert_eq!(column.input_type_ref(), None);
    }

    #[test]
    fn test_declared_values() {
        let column = Column::input("in")
            .with_input_values("\"a\",\"b\"")
            .with_output_values("\"c\"");
        assert_eq!(column.declared_values(), Some("\"a\",\"b\""));

        let column = Column::output("out").with_output_values("\"c\"");
        assert_eq!(column.declared_values(), Some("\"c\""));

        let column = Column::output("out").with_output_values("");
        assert_eq!(column.declared_values(), None);
    }
}
