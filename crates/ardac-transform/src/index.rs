//! First-match-wins lookup of source rows by join key.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use ardac_model::{SourceRow, SourceTable, subject_key};

/// Source rows indexed by join key.
///
/// Only the first row per key is kept; later rows with the same key are
/// counted in [`KeyIndex::duplicates`] and otherwise ignored.
#[derive(Debug, Default)]
pub struct KeyIndex<'a> {
    rows: HashMap<String, &'a SourceRow>,
    duplicates: usize,
}

impl<'a> KeyIndex<'a> {
    /// Indexes `table` by `key_of`; rows without a key are skipped.
    pub fn build<F>(table: &'a SourceTable, mut key_of: F) -> Self
    where
        F: FnMut(&SourceRow) -> Option<String>,
    {
        let mut index = Self::default();
        for row in &table.rows {
            let Some(key) = key_of(row) else {
                continue;
            };
            match index.rows.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(row);
                }
                Entry::Occupied(_) => index.duplicates += 1,
            }
        }
        index
    }

    /// Indexes `table` by the subject key of its `id_column`.
    pub fn by_subject_key(table: &'a SourceTable, id_column: &str) -> Self {
        Self::build(table, |row| row.get(id_column).map(|id| subject_key(id).to_string()))
    }

    pub fn get(&self, key: &str) -> Option<&'a SourceRow> {
        self.rows.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows ignored because an earlier row had the same key.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
