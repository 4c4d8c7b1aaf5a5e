use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Which DCC study the subject extracts come from.
///
/// This is the only mode switch in a run. It selects labels, file names,
/// visit offsets and the auxiliary tables joined by the follow-up node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectsType {
    Observational,
    Clinical,
}

impl SubjectsType {
    /// Label appended to the DCC `usubjid` to form a case submitter id
    /// (`1001` -> `1001_obs`). Also used as `*studies.submitter_id`.
    pub fn study_label(self) -> &'static str {
        match self {
            Self::Observational => "obs",
            Self::Clinical => "clinical",
        }
    }

    /// Short tag used in output file names.
    pub fn file_tag(self) -> &'static str {
        match self {
            Self::Observational => "obs",
            Self::Clinical => "rct",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Observational => "observational",
            Self::Clinical => "clinical",
        }
    }
}

impl fmt::Display for SubjectsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectsType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "observational" => Ok(Self::Observational),
            "clinical" => Ok(Self::Clinical),
            other => Err(ModelError::InvalidSubjectsType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!(
            "observational".parse::<SubjectsType>(),
            Ok(SubjectsType::Observational)
        );
        assert_eq!("clinical".parse::<SubjectsType>(), Ok(SubjectsType::Clinical));
    }

    #[test]
    fn rejects_unknown_mode_with_value() {
        let err = "Clinical".parse::<SubjectsType>().unwrap_err();
        assert_eq!(err, ModelError::InvalidSubjectsType("Clinical".to_string()));
        assert!(err.to_string().contains("'Clinical'"));
    }

    #[test]
    fn labels_and_tags() {
        assert_eq!(SubjectsType::Observational.study_label(), "obs");
        assert_eq!(SubjectsType::Clinical.study_label(), "clinical");
        assert_eq!(SubjectsType::Observational.file_tag(), "obs");
        assert_eq!(SubjectsType::Clinical.file_tag(), "rct");
    }
}
