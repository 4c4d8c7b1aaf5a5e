//! Case node: one record per subject of the DCC subjects extract.

use ardac_model::SubjectsType;

use crate::rules::{FieldRule, Recode, Transform};

/// Column holding the study label.
pub const STUDIES_REFERENCE_COLUMN: &str = "*studies.submitter_id";

const VITAL_STATUS: Recode = Recode {
    pairs: &[("Y", "alive"), ("N", "dead")],
    default: None,
    trim_input: false,
};

#[derive(Debug, Clone, Copy)]
pub struct CaseNodeSpec {
    pub fields: &'static [FieldRule],
    /// Columns set to the same literal on every record.
    pub literals: &'static [(&'static str, &'static str)],
}

const CASE_LITERALS: &[(&str, &str)] = &[("index_date", "Study Enrollment")];

pub const OBSERVATIONAL_CASE_NODE: CaseNodeSpec = CaseNodeSpec {
    fields: &[
        FieldRule::new("cohort", "obs_arm", Transform::SuffixAfterColon),
        FieldRule::new("study_site", "site", Transform::Trim),
        FieldRule::new("vital_status", "ALIVE", Transform::Recode(VITAL_STATUS)),
    ],
    literals: CASE_LITERALS,
};

pub const CLINICAL_CASE_NODE: CaseNodeSpec = CaseNodeSpec {
    fields: &[
        FieldRule::new("actarm", "rct_arm", Transform::Trim),
        FieldRule::new("rct_meld_strata", "rct_meld_strata", Transform::Trim),
        FieldRule::new("study_site", "site", Transform::Trim),
        FieldRule::new("vital_status", "ALIVE", Transform::Recode(VITAL_STATUS)),
    ],
    literals: CASE_LITERALS,
};

pub fn case_node_spec(subjects: SubjectsType) -> &'static CaseNodeSpec {
    match subjects {
        SubjectsType::Observational => &OBSERVATIONAL_CASE_NODE,
        SubjectsType::Clinical => &CLINICAL_CASE_NODE,
    }
}
