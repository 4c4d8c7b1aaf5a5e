use std::collections::BTreeMap;

/// One row of a source extract. Blank fields are simply not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    cells: BTreeMap<String, String>,
}

impl SourceRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell; `None` leaves it null.
    pub fn set(&mut self, column: impl Into<String>, value: Option<String>) {
        let column = column.into();
        match value {
            Some(value) => {
                self.cells.insert(column, value);
            }
            None => {
                self.cells.remove(&column);
            }
        }
    }

    #[must_use]
    pub fn with(mut self, column: &str, value: &str) -> Self {
        self.set(column, Some(value.to_string()));
        self
    }

    /// Raw text of a cell, `None` for null or unknown columns.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }
}

/// A source extract held fully in memory, every value as text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<SourceRow>,
}

impl SourceTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: SourceRow) {
        self.rows.push(row);
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
