//! Error types for node building.

use thiserror::Error;

use crate::nodes::AuxiliarySource;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A source table lacks a column the join depends on.
    #[error("{table} table has no `{column}` column")]
    MissingColumn { table: String, column: String },

    /// The follow-up plan joins a table that was not supplied.
    #[error("no {0} table supplied for the follow-up join")]
    MissingAuxiliary(AuxiliarySource),
}

pub type Result<T> = std::result::Result<T, TransformError>;
