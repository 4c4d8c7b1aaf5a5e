use std::fmt;

use serde::{Deserialize, Serialize};

/// The four ARDaC node types this tool produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Case,
    Audit,
    Demographic,
    FollowUp,
}

impl NodeKind {
    /// Value written to the `*type` column.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Case => "case",
            Self::Audit => "audit",
            Self::Demographic => "demographic",
            Self::FollowUp => "follow_up",
        }
    }

    /// Prefix used for template, node and QC file names.
    pub fn file_prefix(self) -> &'static str {
        self.type_name()
    }

    /// Human-readable name for logs and the run summary.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Case => "Case",
            Self::Audit => "Audit",
            Self::Demographic => "Demographic",
            Self::FollowUp => "Follow-up",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
