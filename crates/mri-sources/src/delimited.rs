//! Delimited text (CSV) parser.
//!
//! UTF-8 input with a mandatory header row. A leading BOM is stripped, the
//! delimiter is sniffed from the header line unless fixed, and ragged rows are
//! tolerated: a short row simply lacks its trailing cells.

use crate::error::{Result, SourceError};
use crate::{ContainerParser, Table};
use csv::ReaderBuilder;
use mri_core::{RawRecord, RawValue};

const BOM: &[u8] = b"\xEF\xBB\xBF";
const CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    /// Fixed delimiter. `None` sniffs it from the header line.
    pub delimiter: Option<u8>,
}

impl CsvParser {
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }
}

impl ContainerParser for CsvParser {
    fn parse(&self, bytes: &[u8]) -> Result<Table> {
        let bytes = bytes.strip_prefix(BOM).unwrap_or(bytes);
        let delimiter = self.delimiter.unwrap_or_else(|| sniff_delimiter(bytes));

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(SourceError::Malformed("CSV input has no header row".into()));
        }

        let mut records = Vec::new();
        for (line, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() > headers.len() {
                tracing::warn!(
                    row = line,
                    cells = row.len(),
                    columns = headers.len(),
                    "extra cells beyond the header ignored"
                );
            }
            let record: RawRecord = headers
                .iter()
                .zip(row.iter())
                .map(|(header, cell)| (header.clone(), RawValue::Text(cell.to_string())))
                .collect();
            records.push(record);
        }

        Ok(Table { headers, records })
    }
}

/// Pick the most frequent candidate delimiter on the first line. Ties and
/// single-column files fall back to `,`.
pub fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line = bytes
        .split(|b| *b == b'\n')
        .next()
        .unwrap_or_default();
    let mut best = (b',', 0usize);
    for candidate in CANDIDATES {
        let count = first_line.iter().filter(|b| **b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(input: &str) -> Table {
        CsvParser::default().parse(input.as_bytes()).unwrap()
    }

    #[rstest]
    #[case::comma("a,b,c\n1,2,3", b',')]
    #[case::semicolon("a;b;c\n1,5;2;3", b';')]
    #[case::tab("a\tb\n1\t2", b'\t')]
    #[case::single_column("meter_id\nM1", b',')]
    fn sniffs(#[case] input: &str, #[case] expected: u8) {
        assert_eq!(sniff_delimiter(input.as_bytes()), expected);
    }

    #[test]
    fn semicolon_file_keeps_decimal_commas_in_cells() {
        let table = parse("Compteur;Valeur\nM-1;12,5\n");
        assert_eq!(table.headers, vec!["Compteur", "Valeur"]);
        assert_eq!(
            table.records[0].get("Valeur"),
            Some(&RawValue::Text("12,5".into()))
        );
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        let table = parse("\u{feff}meter_id,unit\nM1,kWh\n");
        assert_eq!(table.headers[0], "meter_id");
    }

    #[test]
    fn short_rows_lack_trailing_cells() {
        let table = parse("a,b,c\n1,2\n1,2,3,4\n");
        assert_eq!(table.records[0].len(), 2);
        assert_eq!(table.records[0].get("c"), None);
        assert_eq!(table.records[1].len(), 3);
    }

    #[test]
    fn quoted_cells_are_unquoted() {
        let table = parse("meter_id,reading_value\n\"M,1\",\"1,5\"\n");
        assert_eq!(
            table.records[0].get("meter_id"),
            Some(&RawValue::Text("M,1".into()))
        );
    }

    #[test]
    fn rows_keep_source_order() {
        let table = parse("id\nc\na\nb\n");
        let ids: Vec<_> = table
            .records
            .iter()
            .map(|r| r.get("id").unwrap().to_text().into_owned())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn empty_input_has_no_header() {
        assert!(matches!(
            CsvParser::default().parse(b""),
            Err(SourceError::Malformed(_))
        ));
    }
}
