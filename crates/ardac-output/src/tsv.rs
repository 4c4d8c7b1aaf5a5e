//! TSV serialization of node and QC tables.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use ardac_model::{NodeTable, QcTable};
use polars::prelude::{
    Column, CsvWriter, DataFrame, NamedFrom, PolarsError, PolarsResult, SerWriter, Series,
};

use crate::error::{OutputError, Result};

/// Field separator of node and QC files.
pub const TSV_SEPARATOR: u8 = b'\t';

/// Empty strings become null so they are written as empty fields, not `""`.
fn string_column(name: &str, values: Vec<Option<&str>>) -> Column {
    let values: Vec<Option<&str>> = values
        .into_iter()
        .map(|value| value.filter(|v| !v.is_empty()))
        .collect();
    Series::new(name.into(), values).into()
}

/// Node table as a string DataFrame, columns in template order.
pub fn node_frame(table: &NodeTable) -> PolarsResult<DataFrame> {
    let columns = table
        .schema
        .columns()
        .iter()
        .map(|name| string_column(name, table.column_values(name)))
        .collect();
    DataFrame::new(columns)
}

/// QC table as a string DataFrame: `usubjid`, `*submitter_id`, flag columns.
pub fn qc_frame(qc: &QcTable) -> PolarsResult<DataFrame> {
    let names = qc.layout.columns();
    let rows: Vec<Vec<Option<&str>>> = qc.records.iter().map(|r| qc.row_values(r)).collect();
    let columns = names
        .iter()
        .enumerate()
        .map(|(i, name)| string_column(name, rows.iter().map(|row| row[i]).collect()))
        .collect();
    DataFrame::new(columns)
}

/// Writes `df` as tab-separated text with a header line. Nulls are empty fields.
pub fn write_tsv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.is_dir()
    {
        return Err(OutputError::DirectoryNotFound {
            path: parent.to_path_buf(),
        });
    }

    let mut file = File::create(path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(TSV_SEPARATOR)
        .finish(df)
        .map_err(polars_error(path))
}

fn polars_error(path: &Path) -> impl FnOnce(PolarsError) -> OutputError + '_ {
    move |e| OutputError::Polars {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Writes a node table to `path`.
pub fn write_node_table(table: &NodeTable, path: &Path) -> Result<()> {
    let mut df = node_frame(table).map_err(polars_error(path))?;
    write_tsv(&mut df, path)?;
    tracing::info!(path = %path.display(), rows = table.len(), "node file written");
    Ok(())
}

/// Writes a QC table to `path`. An empty table still gets its header.
pub fn write_qc_table(qc: &QcTable, path: &Path) -> Result<()> {
    let mut df = qc_frame(qc).map_err(polars_error(path))?;
    write_tsv(&mut df, path)?;
    tracing::info!(path = %path.display(), rows = qc.len(), "QC file written");
    Ok(())
}

/// Writes a node file and its QC file, or neither.
///
/// Both frames are built and written under `.partial` names first; the
/// final names only appear once both writes succeeded.
pub fn write_node_outputs(
    table: &NodeTable,
    node_path: &Path,
    qc: &QcTable,
    qc_path: &Path,
) -> Result<()> {
    let mut node_df = node_frame(table).map_err(polars_error(node_path))?;
    let mut qc_df = qc_frame(qc).map_err(polars_error(qc_path))?;

    let node_partial = partial_path(node_path);
    let qc_partial = partial_path(qc_path);
    let staged = write_tsv(&mut node_df, &node_partial)
        .and_then(|()| write_tsv(&mut qc_df, &qc_partial));
    if let Err(err) = staged {
        discard(&node_partial);
        discard(&qc_partial);
        return Err(err);
    }

    promote(&node_partial, node_path)?;
    promote(&qc_partial, qc_path)?;
    tracing::info!(path = %node_path.display(), rows = table.len(), "node file written");
    tracing::info!(path = %qc_path.display(), rows = qc.len(), "QC file written");
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn promote(partial: &Path, path: &Path) -> Result<()> {
    fs::rename(partial, path).map_err(|source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn discard(partial: &Path) {
    if partial.exists()
        && let Err(err) = fs::remove_file(partial)
    {
        tracing::warn!(path = %partial.display(), error = %err, "could not remove partial file");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ardac_model::{QcLayout, QcRecord, TemplateSchema};

    #[test]
    fn node_frame_follows_template_order() {
        let schema =
            TemplateSchema::new(vec!["b".to_string(), "a".to_string(), "c".to_string()]).unwrap();
        let mut table = NodeTable::new(schema);
        let mut record = table.empty_record();
        record.set_str("a", "1");
        table.push(record);

        let df = node_frame(&table).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("a").unwrap().str().unwrap().get(0), Some("1"));
        assert_eq!(df.column("b").unwrap().str().unwrap().get(0), None);
    }

    #[test]
    fn qc_frame_has_flag_columns() {
        let mut qc = QcTable::new(QcLayout::new(Some("missing_demographic"), None));
        qc.records.push(QcRecord::unmatched(Some("4".into()), Some("4_obs".into())));
        let df = qc_frame(&qc).unwrap();
        assert_eq!(df.width(), 3);
        assert_eq!(
            df.column("missing_demographic").unwrap().str().unwrap().get(0),
            Some("Y")
        );
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("case_obs.tsv");
        let schema = TemplateSchema::new(vec!["*type".to_string()]).unwrap();
        let err = write_node_table(&NodeTable::new(schema), &path).unwrap_err();
        assert!(matches!(err, OutputError::DirectoryNotFound { .. }));
    }

    #[test]
    fn failed_qc_write_leaves_no_node_file() {
        let dir = tempfile::tempdir().unwrap();
        let node_path = dir.path().join("audit_obs.tsv");
        let qc_path = dir.path().join("absent").join("audit_qc_obs.tsv");
        let schema = TemplateSchema::new(vec!["*type".to_string()]).unwrap();
        let mut table = NodeTable::new(schema);
        let mut record = table.empty_record();
        record.set_str("*type", "audit");
        table.push(record);
        let qc = QcTable::new(QcLayout::new(Some("missing_audit"), Some("empty_audit")));

        let err = write_node_outputs(&table, &node_path, &qc, &qc_path).unwrap_err();

        assert!(matches!(err, OutputError::DirectoryNotFound { .. }));
        assert!(!node_path.exists());
        assert!(!partial_path(&node_path).exists());
    }

    #[test]
    fn node_and_qc_files_are_written_together() {
        let dir = tempfile::tempdir().unwrap();
        let node_path = dir.path().join("audit_obs.tsv");
        let qc_path = dir.path().join("audit_qc_obs.tsv");
        let schema = TemplateSchema::new(vec!["*type".to_string()]).unwrap();
        let qc = QcTable::new(QcLayout::new(Some("missing_audit"), Some("empty_audit")));

        write_node_outputs(&NodeTable::new(schema), &node_path, &qc, &qc_path).unwrap();

        assert_eq!(std::fs::read_to_string(&node_path).unwrap(), "*type\n");
        assert!(qc_path.exists());
        assert!(!partial_path(&qc_path).exists());
    }

    #[test]
    fn empty_strings_are_null_in_frames() {
        let mut qc = QcTable::new(QcLayout::new(Some("missing_audit"), None));
        qc.records.push(QcRecord::unmatched(Some(String::new()), Some("5_obs".into())));
        let df = qc_frame(&qc).unwrap();
        assert_eq!(df.column("usubjid").unwrap().str().unwrap().get(0), None);
    }
}
