//! Delimited file reading. Every value is kept as text.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ardac_model::{SourceRow, SourceTable};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::{IngestError, Result};
use crate::paths::require_file;

/// Reads the first line of a file, without its BOM.
pub(crate) fn read_first_line(path: &Path) -> Result<Option<String>> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut lines = BufReader::new(file).lines();
    match lines.next() {
        Some(line) => {
            let line = line.map_err(|e| IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            // Skip BOM if present
            Ok(Some(line.strip_prefix('\u{feff}').unwrap_or(&line).to_string()))
        }
        None => Ok(None),
    }
}

/// Reads a delimited file into a string-typed Polars DataFrame.
///
/// Schema inference is disabled so identifiers such as `0012` and dates keep
/// their source text. Empty fields load as null.
pub fn read_string_frame(path: &Path, separator: u8) -> Result<DataFrame> {
    require_file(path)?;

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| {
            opts.with_separator(separator)
                .with_truncate_ragged_lines(true)
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Converts a string-typed DataFrame into a row-oriented [`SourceTable`].
///
/// Empty strings, including quoted empty fields, become null.
pub fn frame_to_source_table(df: &DataFrame) -> Result<SourceTable> {
    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    let mut rows = vec![SourceRow::new(); df.height()];

    for column in df.get_columns() {
        let name = column.name().to_string();
        let values = column.str()?;
        for (row, value) in rows.iter_mut().zip(values.into_iter()) {
            let value = value.filter(|v| !v.is_empty()).map(str::to_string);
            row.set(name.clone(), value);
        }
    }

    Ok(SourceTable { columns, rows })
}

/// Reads a delimited source table. Values are never type-inferred.
pub fn read_source_table(path: &Path, separator: u8) -> Result<SourceTable> {
    tracing::info!(path = %path.display(), "reading source table");
    let df = read_string_frame(path, separator)?;
    let table = frame_to_source_table(&df)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.len(),
        columns = table.columns.len(),
        "source table loaded"
    );
    Ok(table)
}

/// Fails with [`IngestError::MissingColumn`] for the first absent column.
pub fn require_columns(table: &SourceTable, columns: &[&str], path: &Path) -> Result<()> {
    for column in columns {
        if !table.has_column(column) {
            return Err(IngestError::MissingColumn {
                column: (*column).to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
