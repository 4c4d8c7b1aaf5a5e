//! Demographic node.

use ardac_model::{NodeKind, QcLayout, SUBMITTER_ID_COLUMN, USUBJID_COLUMN};

use super::{LinkedNodeSpec, PROJECT_ID_COLUMN, TYPE_COLUMN};
use crate::rules::{FieldRule, Recode, Transform};

const DEMOGRAPHIC_CASE_REFERENCE: &str = "*cases.submitter_id";

const VITAL_STATUS: Recode = Recode {
    pairs: &[("Y", "Alive"), ("N", "Dead")],
    default: Some("Not Reported"),
    trim_input: true,
};

const DEMOGRAPHIC_FIELDS: &[FieldRule] = &[
    FieldRule::copy("age_at_index", "calc_age"),
    FieldRule::copy("cause_of_death_primary", "codp"),
    FieldRule::copy("cause_of_death_secondary", "cods"),
    FieldRule::copy("cur_employ_stat", "employed"),
    FieldRule::copy("education", "edu"),
    FieldRule::copy("ethnicity", "ethnic"),
    FieldRule::copy("gender", "gender"),
    FieldRule::copy("marital", "maristat"),
    FieldRule::copy("race", "race"),
    FieldRule::copy("sex", "sex"),
    FieldRule::new("vital_status", "ALIVE", Transform::Recode(VITAL_STATUS)),
    FieldRule::new("year_of_birth", "brthdtc", Transform::YearOf),
    FieldRule::new("year_of_death", "dthdtc", Transform::YearOf),
    FieldRule::new("days_to_death", "dthdtc", Transform::DaysSince("scdat")),
];

pub const DEMOGRAPHIC_NODE: LinkedNodeSpec = LinkedNodeSpec {
    kind: NodeKind::Demographic,
    submitter_suffix: "_demographic",
    case_reference: DEMOGRAPHIC_CASE_REFERENCE,
    source_id_column: USUBJID_COLUMN,
    fields: DEMOGRAPHIC_FIELDS,
    fixed_columns: &[
        TYPE_COLUMN,
        PROJECT_ID_COLUMN,
        SUBMITTER_ID_COLUMN,
        DEMOGRAPHIC_CASE_REFERENCE,
    ],
    qc_layout: QcLayout::new(Some("missing_demographic"), None),
    drop_empty: false,
};
