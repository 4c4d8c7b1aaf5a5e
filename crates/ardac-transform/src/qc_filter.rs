//! Removal of records that carry no mapped data.

use ardac_model::{NodeTable, QcRecord, SUBMITTER_ID_COLUMN, subject_key_opt};

/// Splits `table` into records with data and QC records for those without.
///
/// A record is removed when every column outside `fixed` is null. The QC
/// key comes from the case id in `case_reference`.
pub fn partition_empty(
    table: NodeTable,
    fixed: &[&str],
    case_reference: &str,
) -> (NodeTable, Vec<QcRecord>) {
    let NodeTable { schema, records } = table;
    let (kept, removed): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| !record.is_empty_outside(fixed));

    let qc = removed
        .iter()
        .map(|record| {
            QcRecord::empty(
                subject_key_opt(record.get(case_reference)).map(str::to_string),
                record.get(SUBMITTER_ID_COLUMN).map(str::to_string),
            )
        })
        .collect();

    (
        NodeTable {
            schema,
            records: kept,
        },
        qc,
    )
}
