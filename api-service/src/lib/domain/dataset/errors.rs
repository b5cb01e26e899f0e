use thiserror::Error;

/// Errors raised while converting tabular data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DatasetError {
    #[error("Dataset is empty")]
    Empty,

    #[error("Dataset is not valid UTF-8")]
    InvalidEncoding,

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Invalid CSV: {0}")]
    Parse(String),
}
