//! Delimited file reading.

mod header;
mod reader;

pub use header::{COMMA, TAB, parse_delimited_line};
pub(crate) use reader::read_first_line;
pub use reader::{frame_to_source_table, read_source_table, read_string_frame, require_columns};
