//! TSV output for ARDaC node and QC tables.

mod error;
mod tsv;

pub use error::{OutputError, Result};
pub use tsv::{
    TSV_SEPARATOR, node_frame, qc_frame, write_node_outputs, write_node_table, write_qc_table,
    write_tsv,
};
