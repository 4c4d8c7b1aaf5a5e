//! Follow-up node: one record per case and visit.

use std::fmt;

use ardac_model::{QcLayout, SUBMITTER_ID_COLUMN, SubjectsType};

use super::{PROJECT_ID_COLUMN, TYPE_COLUMN};
use crate::rules::FieldRule;

/// Column holding the visit label in every follow-up DCC table.
pub const VISIT_LABEL_COLUMN: &str = "redcap_event_name";

pub const CASE_REFERENCE_COLUMN: &str = "cases.submitter_id";
pub const DEMOGRAPHIC_REFERENCE_COLUMN: &str = "demographics.submitter_id";
pub const DAYS_TO_FOLLOW_UP_COLUMN: &str = "*days_to_follow_up";
pub const VISIT_DAY_COLUMN: &str = "visit_day";

pub const FOLLOW_UP_FIXED_COLUMNS: &[&str] = &[
    TYPE_COLUMN,
    PROJECT_ID_COLUMN,
    SUBMITTER_ID_COLUMN,
    CASE_REFERENCE_COLUMN,
    DEMOGRAPHIC_REFERENCE_COLUMN,
    DAYS_TO_FOLLOW_UP_COLUMN,
    VISIT_DAY_COLUMN,
];

pub const FOLLOW_UP_QC_LAYOUT: QcLayout = QcLayout::new(None, Some("empty_follow-up"));

/// A visit label and the id suffix of its follow-up record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitOffset {
    pub label: &'static str,
    /// Suffix including the leading `_`, e.g. `_28`.
    pub offset: &'static str,
}

impl VisitOffset {
    const fn new(label: &'static str, offset: &'static str) -> Self {
        Self { label, offset }
    }

    /// Day number of the visit, i.e. the offset without its `_`.
    pub fn day(&self) -> &'static str {
        self.offset.trim_start_matches('_')
    }
}

const OBSERVATIONAL_VISITS: &[VisitOffset] = &[
    VisitOffset::new("Week 0", "_0"),
    VisitOffset::new("Week 4", "_28"),
    VisitOffset::new("Week 12", "_84"),
    VisitOffset::new("Week 24", "_168"),
];

const CLINICAL_VISITS: &[VisitOffset] = &[
    VisitOffset::new("Day 0", "_0"),
    VisitOffset::new("Day 3", "_3"),
    VisitOffset::new("Day 7", "_7"),
    VisitOffset::new("Day 14", "_14"),
    VisitOffset::new("Day 28", "_28"),
    VisitOffset::new("Day 60", "_60"),
    VisitOffset::new("Day 90", "_90"),
    VisitOffset::new("Day 180", "_180"),
];

/// DCC tables that feed the follow-up node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliarySource {
    LiverScores,
    MedicalInfo,
    Vitals,
    StandardOfCare,
}

impl AuxiliarySource {
    pub const ALL: [AuxiliarySource; 4] = [
        Self::LiverScores,
        Self::MedicalInfo,
        Self::Vitals,
        Self::StandardOfCare,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Self::LiverScores => "liver scores",
            Self::MedicalInfo => "medical information",
            Self::Vitals => "vitals",
            Self::StandardOfCare => "standard of care",
        }
    }
}

impl fmt::Display for AuxiliarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One auxiliary table and the columns it contributes.
#[derive(Debug, Clone, Copy)]
pub struct AuxiliarySpec {
    pub source: AuxiliarySource,
    pub fields: &'static [FieldRule],
}

const LIVER_SCORES: AuxiliarySpec = AuxiliarySpec {
    source: AuxiliarySource::LiverScores,
    fields: &[
        FieldRule::copy("meld_score", "meld"),
        FieldRule::copy("child_pugh_score", "cps"),
        FieldRule::copy("tlfb_drinking_days", "tlfbnumdd"),
        FieldRule::copy("tlfb_number_drinks", "tlfbnumd"),
        FieldRule::copy("liver_score_date", "liverdat"),
    ],
};

const MEDICAL_INFO: AuxiliarySpec = AuxiliarySpec {
    source: AuxiliarySource::MedicalInfo,
    fields: &[
        FieldRule::copy("ascites_culture", "ascyn"),
        FieldRule::copy("hep_enceph", "hepenyn"),
        FieldRule::copy("varices", "varyn"),
        FieldRule::copy("hep_carcinoma", "hepcaryn"),
        FieldRule::copy("liver_transplant", "livtnsplyn"),
        FieldRule::copy("ascites_date", "ascdat"),
        FieldRule::copy("hep_enceph_diagnosis_date", "hependat"),
        FieldRule::copy("varices_diagnosis_date", "vardat"),
        FieldRule::copy("hepcar_diagnosis_date", "hepcardat"),
        FieldRule::copy("liver_transplant_date", "livtnspldat"),
    ],
};

const VITALS: AuxiliarySpec = AuxiliarySpec {
    source: AuxiliarySource::Vitals,
    fields: &[
        FieldRule::copy("weight", "weight"),
        FieldRule::copy("bmi", "bmi"),
    ],
};

const STANDARD_OF_CARE: AuxiliarySpec = AuxiliarySpec {
    source: AuxiliarySource::StandardOfCare,
    fields: &[
        FieldRule::copy("infection_screen_done", "infscreennd"),
        FieldRule::copy("infection_screen_date", "infscreen_date"),
        FieldRule::copy("blood_culture", "socisbcnd___999"),
        FieldRule::copy("blood_culture_result", "socisbc"),
        FieldRule::copy("blood_organism", "socisbc_pos"),
        FieldRule::copy("blood_culture_date", "socisbcdat"),
        FieldRule::copy("urine_culture", "socisucnd___999"),
        FieldRule::copy("urine_culture_result", "socisuc"),
        FieldRule::copy("urine_culture_organism", "socisuc_pos"),
        FieldRule::copy("urine_culture_date", "socisucdat"),
        FieldRule::copy("urine_culture_fungal_result", "soicuc_fung"),
        FieldRule::copy("ascites_culture", "socisacnd___999"),
        FieldRule::copy("ascites_culture_result", "socisac"),
        FieldRule::copy("ascites_organism", "socisac_pos"),
        FieldRule::copy("ascites_date", "socisacdat"),
        FieldRule::copy("endoscopy", "endond"),
        FieldRule::copy("endoscopy_date", "endodat"),
        FieldRule::copy("esophageal_varices_size", "endovarsiz_esoph"),
        FieldRule::copy("esophageal_varices_bleed", "endobled_esoph"),
        FieldRule::copy("gastric_varices_size", "endovarsiz_gast"),
        FieldRule::copy("gastric_varices_bleed", "endobled_gast"),
        FieldRule::copy("portal_hypertensive_gastropathy", "porthypsev"),
        FieldRule::copy("esophageal_ulcer_size", "endoulcsiz_esoph"),
        FieldRule::copy("esophageal_ulcer_bleed", "endoulcbled_esoph"),
        FieldRule::copy("gastric_ulcer_size", "endoulcsiz_gast"),
        FieldRule::copy("gastric_ulcer_bleed", "endoulcbled_gast"),
        FieldRule::copy("duodenum_ulcer_size", "endoulcsiz_duod"),
        FieldRule::copy("duodenum_ulcer_bleed", "endoulcbled_duod"),
    ],
};

/// Visits and auxiliary joins for one subjects type.
#[derive(Debug, Clone, Copy)]
pub struct FollowUpPlan {
    pub visits: &'static [VisitOffset],
    /// Joined in order; a later table overwrites shared columns it matched.
    pub auxiliaries: &'static [AuxiliarySpec],
}

impl FollowUpPlan {
    /// Offset for a visit label, `None` for labels outside the schedule.
    pub fn offset_for(&self, label: &str) -> Option<&'static VisitOffset> {
        self.visits.iter().find(|visit| visit.label == label)
    }

    pub fn uses(&self, source: AuxiliarySource) -> bool {
        self.auxiliaries.iter().any(|aux| aux.source == source)
    }
}

const OBSERVATIONAL_PLAN: FollowUpPlan = FollowUpPlan {
    visits: OBSERVATIONAL_VISITS,
    auxiliaries: &[LIVER_SCORES, MEDICAL_INFO, VITALS, STANDARD_OF_CARE],
};

// Medical information is not joined for clinical subjects.
const CLINICAL_PLAN: FollowUpPlan = FollowUpPlan {
    visits: CLINICAL_VISITS,
    auxiliaries: &[LIVER_SCORES, VITALS, STANDARD_OF_CARE],
};

pub fn follow_up_plan(subjects: SubjectsType) -> &'static FollowUpPlan {
    match subjects {
        SubjectsType::Observational => &OBSERVATIONAL_PLAN,
        SubjectsType::Clinical => &CLINICAL_PLAN,
    }
}
