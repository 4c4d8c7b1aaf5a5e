//! Template loading: only the header line of a template is consumed.

use std::path::Path;

use ardac_model::TemplateSchema;

use crate::csv::{TAB, parse_delimited_line, read_first_line};
use crate::error::{IngestError, Result};
use crate::paths::require_file;

/// Reads the ordered column names from a tab-separated template header.
pub fn load_template(path: &Path) -> Result<TemplateSchema> {
    require_file(path)?;
    tracing::info!(path = %path.display(), "reading node template");

    let Some(line) = read_first_line(path)? else {
        return Err(IngestError::EmptyTemplate {
            path: path.to_path_buf(),
        });
    };
    let columns = parse_delimited_line(&line, TAB);
    if columns.iter().all(String::is_empty) {
        return Err(IngestError::EmptyTemplate {
            path: path.to_path_buf(),
        });
    }

    let schema = TemplateSchema::new(columns).map_err(|source| IngestError::InvalidTemplate {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), columns = schema.len(), "template loaded");
    Ok(schema)
}
