//! Record reconciliation and field derivation for ARDaC nodes.
//!
//! Node definitions in [`nodes`] are plain data: field rules, suffixes,
//! fixed columns and QC layouts. [`reconcile`] builds the case, audit and
//! demographic nodes from them; [`follow_up`] builds the visit-based
//! follow-up node. Both use [`qc_filter`] to move records without data to
//! QC.

pub mod error;
pub mod fields;
pub mod follow_up;
pub mod index;
pub mod nodes;
pub mod qc_filter;
pub mod reconcile;
pub mod rules;

pub use error::{Result, TransformError};
pub use fields::{categorical_recode, days_between, suffix_after_colon, trim, year_of};
pub use follow_up::{build_follow_up_node, join_auxiliary, materialize_visits, visit_index};
pub use index::KeyIndex;
pub use nodes::{
    AUDIT_NODE, AuxiliarySource, AuxiliarySpec, CaseNodeSpec, DEMOGRAPHIC_NODE, FollowUpPlan,
    LinkedNodeSpec, NodeContext, VisitOffset, case_node_spec, follow_up_plan,
};
pub use qc_filter::partition_empty;
pub use reconcile::{NodeOutput, build_case_node, reconcile};
pub use rules::{FieldRule, Recode, Transform, unmapped_targets};
