use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("spreadsheet parsing failed: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("cannot infer input format from {0:?}; pass it explicitly")]
    UnknownFormat(PathBuf),

    #[error("unsupported source format {0:?} (expected csv, json or xlsx)")]
    UnsupportedFormat(String),

    #[error("invalid mapping file: {0}")]
    Mapping(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
