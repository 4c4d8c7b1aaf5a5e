//! Existence checks run before anything is read.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Fails with [`IngestError::FileNotFound`] unless `path` is a regular file.
pub fn require_file(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        tracing::error!(path = %path.display(), "input file not found");
        Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Fails with [`IngestError::DirectoryNotFound`] unless `path` is a directory.
pub fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        tracing::error!(path = %path.display(), "directory not found");
        Err(IngestError::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}
