//! Pipelines and logging for the ARDaC node mapper.

pub mod logging;
pub mod pipeline;
pub mod types;
