//! Subject identifiers and the case table built from them.

use crate::SourceTable;

/// Separates the subject id from its suffix in a submitter id (`1001_obs`).
pub const KEY_DELIMITER: char = '_';

/// Identifier column of every ARDaC node file.
pub const SUBMITTER_ID_COLUMN: &str = "*submitter_id";

/// Subject id column in DCC extracts.
pub const USUBJID_COLUMN: &str = "usubjid";

/// Normalized join key: everything before the first `_`, or the whole id.
///
/// ```
/// use ardac_model::subject_key;
///
/// assert_eq!(subject_key("1001_obs"), "1001");
/// assert_eq!(subject_key("1001_obs_28"), "1001");
/// assert_eq!(subject_key("1001"), "1001");
/// ```
pub fn subject_key(id: &str) -> &str {
    id.split_once(KEY_DELIMITER).map_or(id, |(key, _)| key)
}

/// Null-propagating form of [`subject_key`].
pub fn subject_key_opt(id: Option<&str>) -> Option<&str> {
    id.map(subject_key)
}

/// A case node row reduced to what the other nodes join on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRow {
    pub submitter_id: Option<String>,
    pub key: Option<String>,
}

impl CaseRow {
    pub fn new(submitter_id: Option<String>) -> Self {
        let key = subject_key_opt(submitter_id.as_deref()).map(str::to_string);
        Self { submitter_id, key }
    }
}

/// Case node rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseTable {
    pub rows: Vec<CaseRow>,
}

impl CaseTable {
    /// Projects a case node file onto its `*submitter_id` column.
    pub fn from_source(table: &SourceTable) -> Self {
        let rows = table
            .rows
            .iter()
            .map(|row| CaseRow::new(row.get(SUBMITTER_ID_COLUMN).map(str::to_string)))
            .collect();
        Self { rows }
    }

    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: ids
                .into_iter()
                .map(|id| CaseRow::new(Some(id.into())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
