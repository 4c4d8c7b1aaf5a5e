use std::collections::BTreeSet;

use crate::{ModelError, Result};

/// Ordered output columns of an ARDaC node, taken from a template header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSchema {
    columns: Vec<String>,
}

impl TemplateSchema {
    /// Builds a schema, rejecting empty or repeated column names.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        if columns.is_empty() {
            return Err(ModelError::EmptyTemplate);
        }
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(ModelError::DuplicateTemplateColumn(column.clone()));
            }
        }
        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: &str) -> bool {
        self.position(column).is_some()
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}
