//! Declarative node definitions.
//!
//! Each node is a constant table of field rules plus the handful of
//! per-node constants (suffix, back-reference column, fixed columns, QC
//! layout). The engine in [`crate::reconcile`] and [`crate::follow_up`]
//! interprets them; nothing here touches data.

pub mod audit;
pub mod case;
pub mod demographic;
pub mod follow_up;

use ardac_model::{NodeKind, QcLayout, ReleaseConfig, SubjectsType};

use crate::rules::FieldRule;

pub use audit::AUDIT_NODE;
pub use case::{CLINICAL_CASE_NODE, CaseNodeSpec, OBSERVATIONAL_CASE_NODE, case_node_spec};
pub use demographic::DEMOGRAPHIC_NODE;
pub use follow_up::{
    AuxiliarySource, AuxiliarySpec, FOLLOW_UP_FIXED_COLUMNS, FOLLOW_UP_QC_LAYOUT, FollowUpPlan,
    VisitOffset, follow_up_plan,
};

/// Node type column.
pub const TYPE_COLUMN: &str = "*type";

/// Project column.
pub const PROJECT_ID_COLUMN: &str = "project_id";

/// Per-run values every node builder needs.
#[derive(Debug, Clone, Copy)]
pub struct NodeContext<'a> {
    pub subjects: SubjectsType,
    pub release: &'a ReleaseConfig,
}

impl<'a> NodeContext<'a> {
    pub fn new(subjects: SubjectsType, release: &'a ReleaseConfig) -> Self {
        Self { subjects, release }
    }

    pub fn study_label(&self) -> &'static str {
        self.subjects.study_label()
    }

    pub fn project_id(&self) -> &str {
        &self.release.project_id
    }
}

/// A node with one record per case, joined to a single DCC table by subject key.
#[derive(Debug, Clone, Copy)]
pub struct LinkedNodeSpec {
    pub kind: NodeKind,
    /// Appended to the case id to form the node's `*submitter_id`.
    pub submitter_suffix: &'static str,
    /// Column holding the case id.
    pub case_reference: &'static str,
    /// Identifier column of the DCC table.
    pub source_id_column: &'static str,
    pub fields: &'static [FieldRule],
    /// Columns ignored when deciding whether a record is empty.
    pub fixed_columns: &'static [&'static str],
    pub qc_layout: QcLayout,
    /// Move records with no mapped data to QC.
    pub drop_empty: bool,
}
