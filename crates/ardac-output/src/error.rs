//! Error types for writing node files.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Output directory does not exist.
    #[error("output directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to create or write a file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to build or serialize the table.
    #[error("failed to write {path}: {message}")]
    Polars { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;
