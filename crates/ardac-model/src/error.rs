use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid subjects type '{0}': expected 'observational' or 'clinical'")]
    InvalidSubjectsType(String),
    #[error("template column '{0}' appears more than once")]
    DuplicateTemplateColumn(String),
    #[error("template has no columns")]
    EmptyTemplate,
}

pub type Result<T> = std::result::Result<T, ModelError>;
