//! mri-sources — container parsers for mri.
//!
//! Each parser turns the bytes of one input file into a [`Table`]: the header
//! row plus one [`RawRecord`](mri_core::RawRecord) per data row, ready to hand
//! to [`mri_core::Importer`]. Mapping files for explicit imports live here too.

pub mod delimited;
pub mod document;
pub mod error;
pub mod mapping_file;
pub mod workbook;

pub use error::{Result, SourceError};
pub use mapping_file::MappingFile;

use mri_core::RawRecord;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Parsed contents of one input container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Header names in source column order.
    pub headers: Vec<String>,
    /// Data rows in source order.
    pub records: Vec<RawRecord>,
}

/// Trait implemented by each container format.
pub trait ContainerParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    Csv,
    Json,
    Xlsx,
}

impl SourceFormat {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .ok_or_else(|| SourceError::UnknownFormat(path.to_path_buf()))
    }

    pub fn parser(self) -> Box<dyn ContainerParser> {
        match self {
            SourceFormat::Csv => Box::new(delimited::CsvParser::default()),
            SourceFormat::Json => Box::new(document::JsonParser),
            SourceFormat::Xlsx => Box::new(workbook::XlsxParser),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl FromStr for SourceFormat {
    type Err = SourceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" | "txt" | "tsv" => Ok(SourceFormat::Csv),
            "json" => Ok(SourceFormat::Json),
            "xlsx" => Ok(SourceFormat::Xlsx),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Read and parse a file, inferring the format from its extension unless one
/// is given.
pub fn read_path(path: &Path, format: Option<SourceFormat>) -> Result<Table> {
    let format = match format {
        Some(format) => format,
        None => SourceFormat::from_path(path)?,
    };
    let bytes = std::fs::read(path)?;
    let table = format.parser().parse(&bytes)?;
    tracing::info!(
        path = %path.display(),
        %format,
        columns = table.headers.len(),
        records = table.records.len(),
        "source parsed"
    );
    Ok(table)
}
