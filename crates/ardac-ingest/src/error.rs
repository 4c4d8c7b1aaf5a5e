//! Error types for reading templates and source tables.

use std::path::PathBuf;

use ardac_model::ModelError;
use thiserror::Error;

/// Errors that can occur while reading run inputs.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Directory not found.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Failed to parse a delimited file with Polars.
    #[error("failed to parse {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Template file has no header line.
    #[error("template has no header: {path}")]
    EmptyTemplate { path: PathBuf },

    /// Template header is not a valid schema.
    #[error("invalid template {path}: {source}")]
    InvalidTemplate {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    /// Required column not found in a source file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// True for the "input is missing" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::DirectoryNotFound { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/RCT_SUBJECTS.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/RCT_SUBJECTS.csv");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_column_display() {
        let err = IngestError::MissingColumn {
            column: "usubjid".to_string(),
            path: PathBuf::from("audit.csv"),
        };
        assert_eq!(
            err.to_string(),
            "required column 'usubjid' not found in audit.csv"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
