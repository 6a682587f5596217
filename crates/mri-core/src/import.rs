//! Import orchestrator — resolve once, then normalise and validate every record.
//!
//! The importer never stops on a bad row. The only fatal outcomes are an
//! empty input and an explicit mapping that does not fit the headers.

use crate::error::{Error, Result};
use crate::normalizer::{self, NormalizeOptions};
use crate::resolver;
use crate::types::{ImportResult, MappingSpec, RawRecord};
use crate::validator;

/// Import `records`, deriving the header list from the first record.
pub fn import_records(
    records: &[RawRecord],
    explicit: Option<&MappingSpec>,
    source_name: Option<&str>,
) -> Result<ImportResult> {
    Importer::new().run(records, explicit, source_name)
}

/// Configurable import run. Holds no state between runs.
#[derive(Debug, Clone, Default)]
pub struct Importer {
    headers: Option<Vec<String>>,
    options: NormalizeOptions,
}

impl Importer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve against an explicit header list instead of the first record's
    /// keys. Container parsers that know the header row should pass it here.
    pub fn with_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_options(mut self, options: NormalizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(
        &self,
        records: &[RawRecord],
        explicit: Option<&MappingSpec>,
        source_name: Option<&str>,
    ) -> Result<ImportResult> {
        let first = records.first().ok_or(Error::EmptyInput)?;

        let first_headers: Vec<String>;
        let headers: &[String] = match &self.headers {
            Some(headers) => headers,
            None => {
                first_headers = first.headers().map(str::to_string).collect();
                &first_headers
            }
        };
        let mapping = resolver::resolve(headers, explicit)?;
        // Records are read by name; `detected_mapping` still echoes the caller's spec.
        let columns = resolver::by_name(headers, &mapping);

        let mut rows = Vec::with_capacity(records.len());
        let mut issues = Vec::new();

        for (row_index, record) in records.iter().enumerate() {
            let (reading, field_issues) =
                normalizer::normalize(record, &columns, source_name, &self.options);
            issues.extend(field_issues.into_iter().map(|issue| issue.at_row(row_index)));
            issues.extend(validator::validate(&reading, row_index));
            rows.push(reading);
        }

        let result = ImportResult {
            rows,
            issues,
            detected_mapping: mapping,
        };
        let summary = result.summary();
        tracing::info!(
            total = summary.total,
            flagged = summary.flagged,
            issues = summary.issues,
            explicit = explicit.is_some(),
            "import finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::types::{CanonicalField, IssueReason, ValidationIssue};
    use pretty_assertions::assert_eq;

    fn rec(cells: &[(&str, &str)]) -> RawRecord {
        cells.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(
            import_records(&[], None, None),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn bad_explicit_mapping_is_fatal() {
        let mapping = MappingSpec::new().with(CanonicalField::MeterId, "nope");
        let err = import_records(&[rec(&[("meter_id", "M1")])], Some(&mapping), None).unwrap_err();
        assert!(matches!(
            err,
            Error::Mapping(MappingError::UnknownSourceField { .. })
        ));
    }

    #[test]
    fn issues_are_tagged_and_ordered_by_row() {
        let records = vec![
            rec(&[
                ("meter_id", ""),
                ("customer_id", "C1"),
                ("reading_value", "1"),
                ("reading_date", "2024-01-01"),
            ]),
            rec(&[
                ("meter_id", "M2"),
                ("customer_id", "C2"),
                ("reading_value", "x"),
                ("reading_date", "2024-01-01"),
            ]),
        ];
        let result = import_records(&records, None, Some("test")).unwrap();
        assert_eq!(result.rows.len(), 2);
        assert_eq!(
            result.issues,
            vec![
                ValidationIssue {
                    row_index: 0,
                    field: CanonicalField::MeterId,
                    reason: IssueReason::MissingMeterId,
                },
                ValidationIssue {
                    row_index: 1,
                    field: CanonicalField::ReadingValue,
                    reason: IssueReason::UnparsableNumber,
                },
            ]
        );
    }

    #[test]
    fn explicit_headers_allow_mapping_columns_absent_from_first_record() {
        let records = vec![rec(&[("a", "M1")]), rec(&[("a", "M2"), ("b", "C2")])];
        let mapping = MappingSpec::new()
            .with(CanonicalField::MeterId, "a")
            .with(CanonicalField::CustomerId, "b");
        assert!(import_records(&records, Some(&mapping), None).is_err());

        let result = Importer::new()
            .with_headers(["a", "b"])
            .run(&records, Some(&mapping), None)
            .unwrap();
        assert_eq!(result.rows[0].customer_id, "");
        assert_eq!(result.rows[1].customer_id, "C2");
        assert_eq!(result.detected_mapping, mapping);
    }

    #[test]
    fn index_mapping_follows_headers_not_cell_order() {
        let records = vec![
            rec(&[("m", "M1"), ("c", "C1")]),
            rec(&[("c", "C2"), ("m", "M2")]),
        ];
        let mapping = MappingSpec::new()
            .with(CanonicalField::MeterId, 0usize)
            .with(CanonicalField::CustomerId, 1usize);

        let result = Importer::new()
            .with_headers(["m", "c"])
            .run(&records, Some(&mapping), None)
            .unwrap();

        assert_eq!(result.rows[1].meter_id, "M2");
        assert_eq!(result.rows[1].customer_id, "C2");
        assert_eq!(result.detected_mapping, mapping);
    }
}
