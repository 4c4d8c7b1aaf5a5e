//! Case and linked node builders.

use ardac_model::{
    CaseTable, KEY_DELIMITER, NodeKind, NodeRecord, NodeTable, QcRecord, QcTable,
    SUBMITTER_ID_COLUMN, SourceRow, SourceTable, TemplateSchema, USUBJID_COLUMN,
};

use crate::error::{Result, TransformError};
use crate::index::KeyIndex;
use crate::nodes::case::STUDIES_REFERENCE_COLUMN;
use crate::nodes::{
    LinkedNodeSpec, NodeContext, PROJECT_ID_COLUMN, TYPE_COLUMN, case_node_spec,
};
use crate::qc_filter::partition_empty;
use crate::rules::log_unmapped_targets;

/// A node table and its QC records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeOutput {
    pub table: NodeTable,
    pub qc: QcTable,
}

pub(crate) fn require_column(table: &SourceTable, name: &str, column: &str) -> Result<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(TransformError::MissingColumn {
            table: name.to_string(),
            column: column.to_string(),
        })
    }
}

/// Record with `*type` and `project_id` filled in.
pub(crate) fn node_record(table: &NodeTable, kind: NodeKind, ctx: &NodeContext<'_>) -> NodeRecord {
    let mut record = table.empty_record();
    record.set_str(TYPE_COLUMN, kind.type_name());
    record.set_str(PROJECT_ID_COLUMN, ctx.project_id());
    record
}

/// Builds the case node: one record per subject row, in source order.
///
/// A subject without `usubjid` still yields a record, with a null
/// `*submitter_id`.
pub fn build_case_node(
    subjects: &SourceTable,
    schema: &TemplateSchema,
    ctx: &NodeContext<'_>,
) -> Result<NodeTable> {
    require_column(subjects, "subjects", USUBJID_COLUMN)?;
    let spec = case_node_spec(ctx.subjects);
    log_unmapped_targets(NodeKind::Case.type_name(), spec.fields, schema);

    let label = ctx.study_label();
    let mut table = NodeTable::new(schema.clone());
    for row in &subjects.rows {
        let mut record = node_record(&table, NodeKind::Case, ctx);
        record.set_str(STUDIES_REFERENCE_COLUMN, label);
        for (column, value) in spec.literals {
            record.set_str(column, value);
        }
        record.set(
            SUBMITTER_ID_COLUMN,
            row.get(USUBJID_COLUMN)
                .map(|id| format!("{id}{KEY_DELIMITER}{label}")),
        );
        for rule in spec.fields {
            record.set(rule.target, rule.apply(row));
        }
        table.push(record);
    }

    let missing_ids = table
        .records
        .iter()
        .filter(|record| record.get(SUBMITTER_ID_COLUMN).is_none())
        .count();
    if missing_ids > 0 {
        tracing::warn!(rows = missing_ids, "subjects without usubjid");
    }
    Ok(table)
}

fn linked_record(
    table: &NodeTable,
    spec: &LinkedNodeSpec,
    ctx: &NodeContext<'_>,
    case_id: &str,
    row: &SourceRow,
) -> NodeRecord {
    let mut record = node_record(table, spec.kind, ctx);
    record.set_str(
        SUBMITTER_ID_COLUMN,
        &format!("{case_id}{}", spec.submitter_suffix),
    );
    record.set_str(spec.case_reference, case_id);
    for rule in spec.fields {
        record.set(rule.target, rule.apply(row));
    }
    record
}

/// Joins `cases` against `source` by subject key.
///
/// Every case row yields either one node record or one QC record. A case
/// without a matching source row, or without an id, is reported as
/// unmatched. For nodes with `drop_empty`, matched records with no mapped
/// data are then moved to QC as empty.
pub fn reconcile(
    cases: &CaseTable,
    source: &SourceTable,
    schema: &TemplateSchema,
    spec: &LinkedNodeSpec,
    ctx: &NodeContext<'_>,
) -> Result<NodeOutput> {
    let node = spec.kind.type_name();
    require_column(source, node, spec.source_id_column)?;
    log_unmapped_targets(node, spec.fields, schema);

    let index = KeyIndex::by_subject_key(source, spec.source_id_column);
    if index.duplicates() > 0 {
        tracing::debug!(
            node,
            duplicates = index.duplicates(),
            "duplicate subject rows ignored, first row wins"
        );
    }

    let mut table = NodeTable::new(schema.clone());
    let mut qc = QcTable::new(spec.qc_layout);
    for case in &cases.rows {
        let matched = case
            .key
            .as_deref()
            .and_then(|key| index.get(key))
            .zip(case.submitter_id.as_deref());
        match matched {
            Some((row, case_id)) => {
                let record = linked_record(&table, spec, ctx, case_id, row);
                table.push(record);
            }
            None => qc.records.push(QcRecord::unmatched(
                case.key.clone(),
                case.submitter_id.clone(),
            )),
        }
    }
    tracing::debug!(node, matched = table.len(), unmatched = qc.len(), "cases reconciled");

    if spec.drop_empty {
        let (kept, empty) = partition_empty(table, spec.fixed_columns, spec.case_reference);
        if !empty.is_empty() {
            tracing::debug!(node, rows = empty.len(), "records without data moved to QC");
        }
        qc.extend(empty);
        table = kept;
    }

    Ok(NodeOutput { table, qc })
}
