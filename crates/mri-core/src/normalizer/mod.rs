//! Value normalizer. Converts one [`RawRecord`] into a typed [`NormalizedReading`].
//!
//! Every canonical field with a mapping entry is fetched from the record; a
//! value missing from this particular record reads as empty. Values that
//! cannot be converted become `None` and produce a [`FieldIssue`]; the row
//! itself is always returned.

pub mod dates;
pub mod numbers;

pub use dates::{parse_date, DateStrategy};
pub use numbers::parse_number;

use crate::types::{
    CanonicalField, FieldIssue, IssueReason, MappingSpec, NormalizedReading, RawRecord,
};

/// Knobs that tune normalisation for a particular source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// strftime pattern tried before the built-in date strategies.
    pub date_format: Option<String>,
    /// Unit used when no unit column is mapped.
    pub default_unit: Option<String>,
}

/// Normalise one record.
///
/// `source_name`, when given and non-blank, wins over any mapped
/// `source_system` column.
pub fn normalize(
    record: &RawRecord,
    mapping: &MappingSpec,
    source_name: Option<&str>,
    options: &NormalizeOptions,
) -> (NormalizedReading, Vec<FieldIssue>) {
    let text = |field: CanonicalField| -> String {
        mapping
            .get(field)
            .and_then(|column| record.lookup(column))
            .map(|value| value.to_text().trim().to_string())
            .unwrap_or_default()
    };

    let mut issues = Vec::new();

    let reading_value = parse_number(&text(CanonicalField::ReadingValue));
    if reading_value.is_none() {
        issues.push(FieldIssue::new(
            CanonicalField::ReadingValue,
            IssueReason::UnparsableNumber,
        ));
    }

    let reading_date = parse_date(
        &text(CanonicalField::ReadingDate),
        options.date_format.as_deref(),
    );
    if reading_date.is_none() {
        issues.push(FieldIssue::new(
            CanonicalField::ReadingDate,
            IssueReason::UnparsableDate,
        ));
    }

    let unit = if mapping.is_mapped(CanonicalField::Unit) {
        text(CanonicalField::Unit)
    } else {
        options.default_unit.clone().unwrap_or_default()
    };

    let source_system = match source_name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => text(CanonicalField::SourceSystem),
    };

    let reading = NormalizedReading {
        meter_id: text(CanonicalField::MeterId),
        customer_id: text(CanonicalField::CustomerId),
        reading_value,
        reading_date,
        unit,
        source_system,
    };
    (reading, issues)
}
