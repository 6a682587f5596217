//! XLSX workbook parser.
//!
//! Reads the first worksheet; its first row is the header. Numeric cells stay
//! numeric, date-formatted cells become `YYYY-MM-DD` text, and blank cells are
//! `Null`. Fully blank rows are skipped.

use crate::error::{Result, SourceError};
use crate::{ContainerParser, Table};
use calamine::{open_workbook_from_rs, Data, DataType, Reader, Xlsx};
use mri_core::{RawRecord, RawValue};
use std::io::Cursor;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxParser;

impl ContainerParser for XlsxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SourceError::Malformed("workbook has no worksheets".into()))??;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| SourceError::Malformed("worksheet has no header row".into()))?
            .iter()
            .map(|cell| match cell {
                Data::String(s) => s.trim().to_string(),
                Data::Empty => String::new(),
                other => other.to_string(),
            })
            .collect();

        let records = rows
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .map(|row| {
                headers
                    .iter()
                    .zip(row)
                    .map(|(header, cell)| (header.clone(), raw_value(cell)))
                    .collect::<RawRecord>()
            })
            .collect();

        Ok(Table { headers, records })
    }
}

fn raw_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty | Data::Error(_) => RawValue::Null,
        Data::Bool(b) => RawValue::Bool(*b),
        Data::Int(i) => RawValue::Integer(*i),
        Data::Float(f) => RawValue::Float(*f),
        Data::String(s) => RawValue::Text(s.clone()),
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_datetime() {
            Some(dt) => RawValue::Text(dt.date().format("%Y-%m-%d").to_string()),
            None => RawValue::Text(cell.to_string()),
        },
        Data::DurationIso(s) => RawValue::Text(s.clone()),
    }
}
