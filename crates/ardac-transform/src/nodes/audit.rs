//! Audit (AUDIT-C questionnaire) node.

use ardac_model::{NodeKind, QcLayout, SUBMITTER_ID_COLUMN, USUBJID_COLUMN};

use super::{LinkedNodeSpec, PROJECT_ID_COLUMN, TYPE_COLUMN};
use crate::rules::FieldRule;

const AUDIT_CASE_REFERENCE: &str = "cases.submitter_id";

const AUDIT_FIELDS: &[FieldRule] = &[
    FieldRule::copy("auditnd", "auditnd"),
    FieldRule::copy("adt0101", "adt0101"),
    FieldRule::copy("adt0102", "adt0102"),
    FieldRule::copy("adt0103", "adt0103"),
    FieldRule::copy("adt0104", "adt0104"),
    FieldRule::copy("adt0105", "adt0105"),
    FieldRule::copy("adt0106", "adt0106"),
    FieldRule::copy("adt0107", "adt0107"),
    FieldRule::copy("adt0108", "adt0108"),
    FieldRule::copy("adt0109", "adt0109"),
    FieldRule::copy("adt0110", "adt0110"),
];

pub const AUDIT_NODE: LinkedNodeSpec = LinkedNodeSpec {
    kind: NodeKind::Audit,
    submitter_suffix: "_audit",
    case_reference: AUDIT_CASE_REFERENCE,
    source_id_column: USUBJID_COLUMN,
    fields: AUDIT_FIELDS,
    fixed_columns: &[
        TYPE_COLUMN,
        PROJECT_ID_COLUMN,
        SUBMITTER_ID_COLUMN,
        AUDIT_CASE_REFERENCE,
    ],
    qc_layout: QcLayout::new(Some("missing_audit"), Some("empty_audit")),
    drop_empty: true,
};
