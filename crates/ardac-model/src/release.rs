//! Release and naming configuration.
//!
//! Every file name a run reads or writes is derived from one `ReleaseConfig`
//! built at startup, so the DCC release string only lives in one place.

use serde::{Deserialize, Serialize};

use crate::{NodeKind, SubjectsType};

/// DCC data model release the mappings target.
pub const DEFAULT_DCC_RELEASE: &str = "2.0.0";

/// Version of the mapping rules.
pub const DEFAULT_MAPPING_VERSION: &str = "1.0.0";

/// ARDaC project every node row belongs to.
pub const DEFAULT_PROJECT_ID: &str = "ARDaC-AlcHepNet";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
    pub dcc_release: String,
    pub mapping_version: String,
    pub project_id: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            dcc_release: DEFAULT_DCC_RELEASE.to_string(),
            mapping_version: DEFAULT_MAPPING_VERSION.to_string(),
            project_id: DEFAULT_PROJECT_ID.to_string(),
        }
    }
}

impl ReleaseConfig {
    #[must_use]
    pub fn with_dcc_release(mut self, release: impl Into<String>) -> Self {
        self.dcc_release = release.into();
        self
    }

    #[must_use]
    pub fn with_mapping_version(mut self, version: impl Into<String>) -> Self {
        self.mapping_version = version.into();
        self
    }

    /// `DCC_data_release_v2.0.0`
    pub fn dcc_release_string(&self) -> String {
        format!("DCC_data_release_v{}", self.dcc_release)
    }

    /// `mapping_v1.0.0`
    pub fn mapping_version_string(&self) -> String {
        format!("mapping_v{}", self.mapping_version)
    }

    /// Combined string reported by `version`.
    pub fn version_string(&self) -> String {
        format!(
            "DCC_VERSION={},MAPPING_VERSION={}",
            self.dcc_release_string(),
            self.mapping_version_string()
        )
    }

    pub fn template_file_name(&self, kind: NodeKind) -> String {
        format!("submission_{}_template.tsv", kind.file_prefix())
    }

    pub fn node_file_name(&self, kind: NodeKind, subjects: SubjectsType) -> String {
        format!(
            "{}_{}_{}.tsv",
            kind.file_prefix(),
            subjects.file_tag(),
            self.dcc_release_string()
        )
    }

    pub fn qc_file_name(&self, kind: NodeKind, subjects: SubjectsType) -> String {
        format!(
            "{}_qc_{}_{}.tsv",
            kind.file_prefix(),
            subjects.file_tag(),
            self.dcc_release_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_version_strings() {
        let config = ReleaseConfig::default();
        assert_eq!(config.dcc_release_string(), "DCC_data_release_v2.0.0");
        assert_eq!(config.mapping_version_string(), "mapping_v1.0.0");
        assert_eq!(
            config.version_string(),
            "DCC_VERSION=DCC_data_release_v2.0.0,MAPPING_VERSION=mapping_v1.0.0"
        );
    }

    #[test]
    fn file_names_follow_release() {
        let config = ReleaseConfig::default();
        assert_eq!(
            config.template_file_name(NodeKind::Case),
            "submission_case_template.tsv"
        );
        assert_eq!(
            config.template_file_name(NodeKind::FollowUp),
            "submission_follow_up_template.tsv"
        );
        assert_eq!(
            config.node_file_name(NodeKind::Case, SubjectsType::Observational),
            "case_obs_DCC_data_release_v2.0.0.tsv"
        );
        assert_eq!(
            config.node_file_name(NodeKind::Audit, SubjectsType::Clinical),
            "audit_rct_DCC_data_release_v2.0.0.tsv"
        );
        assert_eq!(
            config.qc_file_name(NodeKind::Audit, SubjectsType::Observational),
            "audit_qc_obs_DCC_data_release_v2.0.0.tsv"
        );
    }

    #[test]
    fn overridden_release_changes_names() {
        let config = ReleaseConfig::default().with_dcc_release("3.1.0");
        assert_eq!(
            config.node_file_name(NodeKind::Demographic, SubjectsType::Clinical),
            "demographic_rct_DCC_data_release_v3.1.0.tsv"
        );
    }
}
