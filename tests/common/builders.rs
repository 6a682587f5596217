//! Test builders — ergonomic constructors for `RawRecord` and
//! `NormalizedReading`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::NaiveDate;
use mri_core::{NormalizedReading, RawRecord, RawValue};

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures. Cells keep insertion order.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new()
///     .cell("id_compteur", "M1")
///     .cell("valeur_releve", "12,5")
///     .build();
/// ```
#[derive(Default)]
pub struct RecordBuilder {
    record: RawRecord,
}

impl RecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(mut self, header: &str, value: impl Into<RawValue>) -> Self {
        self.record.push(header, value);
        self
    }

    pub fn build(self) -> RawRecord {
        self.record
    }
}

/// Build a record from `(header, text)` pairs.
pub fn record(cells: &[(&str, &str)]) -> RawRecord {
    cells.iter().map(|(h, v)| (*h, *v)).collect()
}

/// Build records sharing one header row, like a parsed CSV.
pub fn records(headers: &[&str], rows: &[&[&str]]) -> Vec<RawRecord> {
    rows.iter()
        .map(|row| headers.iter().copied().zip(row.iter().copied()).collect())
        .collect()
}

// ---------------------------------------------------------------------------
// ReadingBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`NormalizedReading`] fixtures. Starts from a complete,
/// issue-free reading.
pub struct ReadingBuilder {
    reading: NormalizedReading,
}

impl ReadingBuilder {
    pub fn new(meter_id: &str) -> Self {
        Self {
            reading: NormalizedReading {
                meter_id: meter_id.to_string(),
                customer_id: "C1".to_string(),
                reading_value: Some(1.0),
                reading_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                unit: "kWh".to_string(),
                source_system: "test".to_string(),
            },
        }
    }

    pub fn customer(mut self, customer_id: &str) -> Self {
        self.reading.customer_id = customer_id.to_string();
        self
    }

    pub fn value(mut self, value: Option<f64>) -> Self {
        self.reading.reading_value = value;
        self
    }

    pub fn date(mut self, iso: Option<&str>) -> Self {
        self.reading.reading_date =
            iso.map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("fixture date"));
        self
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.reading.unit = unit.to_string();
        self
    }

    pub fn source(mut self, source: &str) -> Self {
        self.reading.source_system = source.to_string();
        self
    }

    pub fn build(self) -> NormalizedReading {
        self.reading
    }
}

// ---------------------------------------------------------------------------
// Pipeline shortcuts
// ---------------------------------------------------------------------------

/// Parse CSV text the way the CLI does (sniffed delimiter, header row).
pub fn parse_csv(text: &str) -> mri_sources::Table {
    use mri_sources::ContainerParser;
    mri_sources::delimited::CsvParser::default()
        .parse(text.as_bytes())
        .expect("fixture CSV parses")
}

/// Parse and import CSV text with auto-detection.
pub fn import_csv(text: &str, source_name: Option<&str>) -> mri_core::ImportResult {
    let table = parse_csv(text);
    mri_core::Importer::new()
        .with_headers(table.headers)
        .run(&table.records, None, source_name)
        .expect("fixture CSV imports")
}
