use std::collections::BTreeMap;

use crate::TemplateSchema;

/// One output row of a node. Holds a slot for every template column and
/// nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    cells: BTreeMap<String, Option<String>>,
}

impl NodeRecord {
    /// All-null record for `schema`.
    pub fn for_schema(schema: &TemplateSchema) -> Self {
        Self {
            cells: schema
                .columns()
                .iter()
                .map(|column| (column.clone(), None))
                .collect(),
        }
    }

    /// Sets a template column. An empty string is stored as null. Returns
    /// `false` (and stores nothing) when the template has no such column.
    pub fn set(&mut self, column: &str, value: Option<String>) -> bool {
        match self.cells.get_mut(column) {
            Some(slot) => {
                *slot = value.filter(|v| !v.is_empty());
                true
            }
            None => false,
        }
    }

    pub fn set_str(&mut self, column: &str, value: &str) -> bool {
        self.set(column, Some(value.to_string()))
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).and_then(|value| value.as_deref())
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Column names, sorted.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// True when every column outside `fixed` is null.
    pub fn is_empty_outside(&self, fixed: &[&str]) -> bool {
        self.cells
            .iter()
            .filter(|(column, _)| !fixed.contains(&column.as_str()))
            .all(|(_, value)| value.is_none())
    }
}

/// Records of one node in output order, with the template they conform to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTable {
    pub schema: TemplateSchema,
    pub records: Vec<NodeRecord>,
}

impl NodeTable {
    pub fn new(schema: TemplateSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    pub fn empty_record(&self) -> NodeRecord {
        NodeRecord::for_schema(&self.schema)
    }

    pub fn push(&mut self, record: NodeRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column values of one template column, in record order.
    pub fn column_values(&self, column: &str) -> Vec<Option<&str>> {
        self.records.iter().map(|record| record.get(column)).collect()
    }
}
