//! Quality-control records for rows left out of a node.

use serde::{Deserialize, Serialize};

use crate::{SUBMITTER_ID_COLUMN, USUBJID_COLUMN};

/// Value written to a QC flag column.
pub const QC_FLAG: &str = "Y";

/// Why a row was left out of the node file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QcReason {
    /// The case row had no matching source row.
    Unmatched,
    /// The row matched but every non-fixed column ended up null.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QcRecord {
    pub key: Option<String>,
    pub submitter_id: Option<String>,
    pub reason: QcReason,
}

impl QcRecord {
    pub fn unmatched(key: Option<String>, submitter_id: Option<String>) -> Self {
        Self {
            key,
            submitter_id,
            reason: QcReason::Unmatched,
        }
    }

    pub fn empty(key: Option<String>, submitter_id: Option<String>) -> Self {
        Self {
            key,
            submitter_id,
            reason: QcReason::Empty,
        }
    }
}

/// Flag column names of a node's QC file, one per reason the node reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QcLayout {
    pub unmatched_flag: Option<&'static str>,
    pub empty_flag: Option<&'static str>,
}

impl QcLayout {
    pub const fn new(
        unmatched_flag: Option<&'static str>,
        empty_flag: Option<&'static str>,
    ) -> Self {
        Self {
            unmatched_flag,
            empty_flag,
        }
    }

    pub fn flag_column(&self, reason: QcReason) -> Option<&'static str> {
        match reason {
            QcReason::Unmatched => self.unmatched_flag,
            QcReason::Empty => self.empty_flag,
        }
    }

    /// `usubjid`, `*submitter_id`, then the flag columns.
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns = vec![USUBJID_COLUMN, SUBMITTER_ID_COLUMN];
        columns.extend(self.unmatched_flag);
        columns.extend(self.empty_flag);
        columns
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QcTable {
    pub layout: QcLayout,
    pub records: Vec<QcRecord>,
}

impl QcTable {
    pub fn new(layout: QcLayout) -> Self {
        Self {
            layout,
            records: Vec::new(),
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = QcRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cells of one record in [`QcLayout::columns`] order.
    pub fn row_values<'a>(&self, record: &'a QcRecord) -> Vec<Option<&'a str>> {
        let mut values = vec![record.key.as_deref(), record.submitter_id.as_deref()];
        for reason in [QcReason::Unmatched, QcReason::Empty] {
            if self.layout.flag_column(reason).is_some() {
                values.push((record.reason == reason).then_some(QC_FLAG));
            }
        }
        values
    }
}
