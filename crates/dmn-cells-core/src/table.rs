//! Decision table - the main document structure

use crate::cell::{CellContent, CellKey, CellRef};
use crate::column::Column;
use crate::error::{Error, Result};
use crate::row::Row;
use ahash::AHashMap;

/// Content reported for cells that were never written
static EMPTY_CONTENT: CellContent = CellContent {
    text: String::new(),
    description: None,
};

/// A decision table (rows × columns of textual entries)
///
/// The table owns all content. Every (row, column) pair is a cell; cells
/// that were never written read as empty text.
#[derive(Debug, Default)]
pub struct DecisionTable {
    /// Decision id
    id: String,
    /// Rows in display order
    rows: Vec<Row>,
    /// Columns in display order
    columns: Vec<Column>,
    /// Written cell contents
    cells: AHashMap<CellKey, CellContent>,
}

impl DecisionTable {
    /// Create an empty table
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Decision id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Iterate over rows in display order
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Iterate over columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Get a row by id
    pub fn row(&self, id: &str) -> Option<&Row> {
        self.rows.iter().find(|row| row.id == id)
    }

    /// Get a column by id
    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// Get a mutable column by id
    pub fn column_mut(&mut self, id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == id)
    }

    /// Append a row
    pub fn add_row(&mut self, row: Row) -> Result<usize> {
        let index = self.rows.len();
        self.insert_row(index, row)?;
        Ok(index)
    }

    /// Insert a row at a specific index
    pub fn insert_row(&mut self, index: usize, row: Row) -> Result<()> {
        validate_id(&row.id)?;
        if self.row(&row.id).is_some() {
            return Err(Error::DuplicateRow(row.id));
        }
        let index = index.min(self.rows.len());
        self.rows.insert(index, row);
        Ok(())
    }

    /// Remove a row and all of its cells
    pub fn remove_row(&mut self, id: &str) -> Result<Row> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| Error::UnknownRow(id.to_string()))?;
        self.cells.retain(|key, _| key.row != id);
        Ok(self.rows.remove(index))
    }

    /// Append a column
    pub fn add_column(&mut self, column: Column) -> Result<usize> {
        let index = self.columns.len();
        self.insert_column(index, column)?;
        Ok(index)
    }

    /// Insert a column at a specific index
    pub fn insert_column(&mut self, index: usize, column: Column) -> Result<()> {
        validate_id(&column.id)?;
        if self.column(&column.id).is_some() {
            return Err(Error::DuplicateColumn(column.id));
        }
        let index = index.min(self.columns.len());
        self.columns.insert(index, column);
        Ok(())
    }

    /// Remove a column and all of its cells
    pub fn remove_column(&mut self, id: &str) -> Result<Column> {
        let index = self
            .columns
            .iter()
            .position(|column| column.id == id)
            .ok_or_else(|| Error::UnknownColumn(id.to_string()))?;
        self.cells.retain(|key, _| key.column != id);
        Ok(self.columns.remove(index))
    }

    /// Get a cell view
    pub fn cell(&self, row: &str, column: &str) -> Option<CellRef<'_>> {
        let row = self.row(row)?;
        let column = self.column(column)?;
        Some(self.cell_ref(row, column))
    }

    /// Get a cell view by key
    pub fn cell_by_key(&self, key: &CellKey) -> Option<CellRef<'_>> {
        self.cell(&key.row, &key.column)
    }

    /// Iterate over every cell, row by row
    pub fn cells(&self) -> impl Iterator<Item = CellRef<'_>> {
        self.rows.iter().flat_map(move |row| {
            self.columns
                .iter()
                .map(move |column| self.cell_ref(row, column))
        })
    }

    /// Keys of every cell, row by row
    pub fn cell_keys(&self) -> Vec<CellKey> {
        self.cells().map(|cell| cell.key()).collect()
    }

    /// Text of a cell (empty for unwritten cells, `None` for unknown cells)
    pub fn text(&self, row: &str, column: &str) -> Option<&str> {
        self.cell(row, column).map(|cell| cell.text())
    }

    /// Replace the text of a cell, keeping its description
    pub fn set_text(&mut self, row: &str, column: &str, text: impl Into<String>) -> Result<()> {
        let key = self.checked_key(row, column)?;
        self.cells.entry(key).or_default().text = text.into();
        Ok(())
    }

    /// Replace the whole content of a cell
    pub fn set_content(&mut self, row: &str, column: &str, content: CellContent) -> Result<()> {
        let key = self.checked_key(row, column)?;
        self.cells.insert(key, content);
        Ok(())
    }

    fn checked_key(&self, row: &str, column: &str) -> Result<CellKey> {
        if self.row(row).is_none() {
            return Err(Error::UnknownRow(row.to_string()));
        }
        if self.column(column).is_none() {
            return Err(Error::UnknownColumn(column.to_string()));
        }
        Ok(CellKey::new(row, column))
    }

    fn cell_ref<'a>(&'a self, row: &'a Row, column: &'a Column) -> CellRef<'a> {
        let key = CellKey::new(row.id.as_str(), column.id.as_str());
        CellRef {
            row,
            column,
            content: self.cells.get(&key).unwrap_or(&EMPTY_CONTENT),
        }
    }
}

fn validate_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::RowKind;
    use pretty_assertions::assert_eq;

    fn sample() -> DecisionTable {
        let mut table = DecisionTable::new("dish");
        table.add_column(Column::input("season")).unwrap();
        table.add_column(Column::output("dish")).unwrap();
        table.add_row(Row::head("labels")).unwrap();
        table.add_row(Row::body("rule1")).unwrap();
        table.add_row(Row::body("rule2")).unwrap();
        table
    }

    #[test]
    fn test_unwritten_cells_are_empty() {
        let table = sample();
        assert_eq!(table.text("rule1", "season"), Some(""));
        assert_eq!(table.text("rule9", "season"), None);
        assert_eq!(table.cells().count(), 6);
    }

    #[test]
    fn test_set_text() {
        let mut table = sample();
        table.set_text("rule1", "season", "\"Fall\"").unwrap();
        assert_eq!(table.text("rule1", "season"), Some("\"Fall\""));

        assert!(matches!(
            table.set_text("nope", "season", "x"),
            Err(Error::UnknownRow(_))
        ));
        assert!(matches!(
            table.set_text("rule1", "nope", "x"),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_set_text_keeps_description() {
        let mut table = sample();
        table
            .set_content("rule1", "dish", CellContent::new("x").with_description("d"))
            .unwrap();
        table.set_text("rule1", "dish", "y").unwrap();

        let cell = table.cell("rule1", "dish").unwrap();
        assert_eq!(cell.text(), "y");
        assert_eq!(cell.content.description.as_deref(), Some("d"));
    }

    #[test]
    fn test_duplicate_ids() {
        let mut table = sample();
        assert!(matches!(
            table.add_row(Row::body("rule1")),
            Err(Error::DuplicateRow(_))
        ));
        assert!(matches!(
            table.add_column(Column::input("season")),
            Err(Error::DuplicateColumn(_))
        ));
        assert!(matches!(
            table.add_row(Row::body(" ")),
            Err(Error::InvalidId(_))
        ));
    }

    #[test]
    fn test_cells_row_major() {
        let table = sample();
        let keys: Vec<String> = table.cells().map(|c| c.key().to_string()).collect();
        assert_eq!(
            keys,
            vec![
                "labels/season",
                "labels/dish",
                "rule1/season",
                "rule1/dish",
                "rule2/season",
                "rule2/dish",
            ]
        );
        assert_eq!(table.row("labels").unwrap().kind, RowKind::Head);
    }

    #[test]
    fn test_remove_drops_cells() {
        let mut table = sample();
        table.set_text("rule1", "season", "\"Fall\"").unwrap();
        table.remove_row("rule1").unwrap();
        table.add_row(Row::body("rule1")).unwrap();
        assert_eq!(table.text("rule1", "season"), Some(""));

        table.remove_column("dish").unwrap();
        assert_eq!(table.column_count(), 1);
        assert!(matches!(
            table.remove_column("dish"),
            Err(Error::UnknownColumn(_))
        ));
    }

    #[test]
    fn test_insert_positions() {
        let mut table = sample();
        table.insert_row(1, Row::body("rule0")).unwrap();
        let ids: Vec<&str> = table.rows().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["labels", "rule0", "rule1", "rule2"]);

        table.insert_column(99, Column::annotation("notes")).unwrap();
        assert_eq!(table.columns().last().unwrap().id, "notes");
    }
}
