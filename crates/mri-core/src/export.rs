//! Export layer: serialises normalised rows back into a columnar file.
//!
//! Columns are always written in [`CanonicalField::ALL`] order regardless of
//! the mapping the rows came from. Numbers use `.` as the decimal point and
//! never a thousands separator, so an export re-imports to the same rows.

use crate::error::{Error, Result};
use crate::types::{CanonicalField, NormalizedReading};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const WORKSHEET_NAME: &str = "readings";
const FILE_STEM: &str = "readings_normalized";
const BLANK_ROW_MARKER: &str = " ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_CONTENT_TYPE,
            ExportFormat::Xlsx => XLSX_CONTENT_TYPE,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(Error::UnsupportedFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Fixed number of decimals for `reading_value`. `None` writes the
    /// shortest representation that reads back to the same number.
    pub decimal_places: Option<usize>,
}

/// Serialised rows ready to hand to a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// Export `rows` in the named format (`"csv"` or `"xlsx"`).
pub fn export(rows: &[NormalizedReading], format: &str) -> Result<Export> {
    export_as(rows, format.parse()?, &ExportOptions::default())
}

pub fn export_as(
    rows: &[NormalizedReading],
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<Export> {
    let bytes = match format {
        ExportFormat::Csv => write_csv(rows, options)?,
        ExportFormat::Xlsx => write_xlsx(rows, options)?,
    };
    tracing::debug!(rows = rows.len(), bytes = bytes.len(), ?format, "export written");
    Ok(Export {
        bytes,
        filename: format!("{FILE_STEM}.{}", format.extension()),
        content_type: format.content_type(),
    })
}

/// Locale-free rendering of a reading value.
pub fn format_value(value: f64, decimal_places: Option<usize>) -> String {
    match decimal_places {
        Some(places) => format!("{value:.places$}"),
        None => value.to_string(),
    }
}

fn header() -> [&'static str; 6] {
    CanonicalField::ALL.map(CanonicalField::as_str)
}

fn write_csv(rows: &[NormalizedReading], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header())?;
    for row in rows {
        let value = row
            .reading_value
            .map(|v| format_value(v, options.decimal_places))
            .unwrap_or_default();
        let date = row.reading_date_iso().unwrap_or_default();
        writer.write_record([
            row.meter_id.as_str(),
            row.customer_id.as_str(),
            value.as_str(),
            date.as_str(),
            row.unit.as_str(),
            row.source_system.as_str(),
        ])?;
    }
    writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

fn row_is_blank(row: &NormalizedReading) -> bool {
    row.reading_value.is_none()
        && row.reading_date.is_none()
        && [&row.meter_id, &row.customer_id, &row.unit, &row.source_system]
            .iter()
            .all(|text| text.is_empty())
}

fn write_xlsx(rows: &[NormalizedReading], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let number_format = options.decimal_places.map(|places| {
        let pattern = match places {
            0 => "0".to_string(),
            n => format!("0.{}", "0".repeat(n)),
        };
        Format::new().set_num_format(pattern)
    });

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(WORKSHEET_NAME)?;
        for (col, name) in (0u16..).zip(header()) {
            sheet.write_string_with_format(0, col, name, &bold)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let r = u32::try_from(index + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            // Blank strings stay blank cells; they read back as empty.
            let text_cells = [
                (0u16, row.meter_id.as_str()),
                (1, row.customer_id.as_str()),
                (4, row.unit.as_str()),
                (5, row.source_system.as_str()),
            ];
            for (col, text) in text_cells {
                if !text.is_empty() {
                    sheet.write_string(r, col, text)?;
                }
            }
            // A row with no cell at all is invisible to readers; one space
            // keeps it and trims back to an empty meter_id on import.
            if row_is_blank(row) {
                sheet.write_string(r, 0, BLANK_ROW_MARKER)?;
            }
            if let Some(value) = row.reading_value {
                match &number_format {
                    Some(format) => sheet.write_number_with_format(r, 2, value, format)?,
                    None => sheet.write_number(r, 2, value)?,
                };
            }
            if let Some(date) = row.reading_date_iso() {
                sheet.write_string(r, 3, date)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
