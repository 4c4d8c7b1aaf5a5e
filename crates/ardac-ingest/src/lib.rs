//! Input handling for the ARDaC node mappers.
//!
//! Reads the three kinds of input a run consumes:
//!
//! - **Templates**: tab-separated files of which only the header line is used
//! - **DCC extracts**: comma-separated source tables, loaded as text
//! - **Case nodes**: tab-separated case node files written by an earlier run
//!
//! Every read checks that its input exists first and reports a missing file
//! as [`IngestError::FileNotFound`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use ardac_ingest::{COMMA, load_template, read_case_table, read_source_table};
//!
//! let schema = load_template(Path::new("templates/submission_audit_template.tsv"))?;
//! let audit = read_source_table(Path::new("dcc/OBS_AUDIT.csv"), COMMA)?;
//! let cases = read_case_table(Path::new("out/case_obs_DCC_data_release_v2.0.0.tsv"))?;
//! ```

mod case;
mod csv;
mod error;
mod paths;
mod template;

// === Error Types ===
pub use error::{IngestError, Result};

// === Path Checks ===
pub use paths::{require_dir, require_file};

// === Delimited Reading ===
pub use csv::{
    COMMA, TAB, frame_to_source_table, parse_delimited_line, read_source_table,
    read_string_frame, require_columns,
};

// === Templates and Case Nodes ===
pub use case::read_case_table;
pub use template::load_template;
