//! Data model for ARDaC node mapping.
//!
//! Everything here is plain data: template schemas, source extracts held as
//! text, case tables, node records and QC records, plus the release
//! configuration that names the files a run touches.

pub mod error;
pub mod ids;
pub mod node;
pub mod qc;
pub mod record;
pub mod release;
pub mod subjects;
pub mod table;
pub mod template;

pub use error::{ModelError, Result};
pub use ids::{
    CaseRow, CaseTable, KEY_DELIMITER, SUBMITTER_ID_COLUMN, USUBJID_COLUMN, subject_key,
    subject_key_opt,
};
pub use node::NodeKind;
pub use qc::{QC_FLAG, QcLayout, QcReason, QcRecord, QcTable};
pub use record::{NodeRecord, NodeTable};
pub use release::{DEFAULT_DCC_RELEASE, DEFAULT_MAPPING_VERSION, DEFAULT_PROJECT_ID, ReleaseConfig};
pub use subjects::SubjectsType;
pub use table::{SourceRow, SourceTable};
pub use template::TemplateSchema;
