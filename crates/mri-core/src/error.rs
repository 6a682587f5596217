//! Fatal errors for the pipeline.
//!
//! Anything that aborts a whole call lives here. Row-level problems are not
//! errors; they become [`ValidationIssue`](crate::ValidationIssue)s.

use crate::types::CanonicalField;
use thiserror::Error;

/// An explicit mapping references a column the input does not have.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("mapping for `{field}` names unknown source field {column:?}")]
    UnknownSourceField {
        field: CanonicalField,
        column: String,
    },

    #[error("mapping for `{field}` names column {index}, but the input has {width} columns")]
    ColumnOutOfRange {
        field: CanonicalField,
        index: usize,
        width: usize,
    },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("no records to import")]
    EmptyInput,

    #[error("unsupported export format {0:?} (expected csv or xlsx)")]
    UnsupportedFormat(String),

    #[error("CSV serialisation failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX serialisation failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
