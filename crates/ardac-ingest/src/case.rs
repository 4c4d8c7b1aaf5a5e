//! Reading previously generated case node files.

use std::path::Path;

use ardac_model::{CaseTable, SUBMITTER_ID_COLUMN};

use crate::csv::{TAB, read_source_table, require_columns};
use crate::error::Result;

/// Reads a case node TSV and projects it onto `*submitter_id` and its key.
pub fn read_case_table(path: &Path) -> Result<CaseTable> {
    let table = read_source_table(path, TAB)?;
    require_columns(&table, &[SUBMITTER_ID_COLUMN], path)?;
    let cases = CaseTable::from_source(&table);
    tracing::info!(path = %path.display(), cases = cases.len(), "case node loaded");
    Ok(cases)
}
