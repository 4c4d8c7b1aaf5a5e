use std::path::PathBuf;

use ardac_model::{NodeKind, SubjectsType};
use serde::Serialize;

/// Outcome of one node run, printed as a table and optionally saved as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeRunSummary {
    pub node: NodeKind,
    pub subjects: SubjectsType,
    pub dcc_release: String,
    pub records: usize,
    /// `None` for nodes without a QC file.
    pub qc_records: Option<usize>,
    pub node_file: PathBuf,
    pub qc_file: Option<PathBuf>,
    pub duration_ms: u64,
}
