//! Row validator. Flags suspicious or incomplete normalised rows.
//!
//! Parse failures are already recorded by the normalizer; the validator adds
//! the checks that only make sense on the typed row. It never drops a row.

use crate::types::{CanonicalField, IssueReason, NormalizedReading, ValidationIssue};

pub fn validate(reading: &NormalizedReading, row_index: usize) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut flag = |field, reason| {
        issues.push(ValidationIssue {
            row_index,
            field,
            reason,
        })
    };

    if reading.meter_id.is_empty() {
        flag(CanonicalField::MeterId, IssueReason::MissingMeterId);
    }
    if reading.customer_id.is_empty() {
        flag(CanonicalField::CustomerId, IssueReason::MissingCustomerId);
    }
    // Negative readings are kept: suspicious, not necessarily wrong.
    if reading.reading_value.is_some_and(|value| value < 0.0) {
        flag(CanonicalField::ReadingValue, IssueReason::NegativeReadingValue);
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn reading() -> NormalizedReading {
        NormalizedReading {
            meter_id: "M1".into(),
            customer_id: "C1".into(),
            reading_value: Some(1.0),
            ..Default::default()
        }
    }

    #[test]
    fn complete_row_passes() {
        assert!(validate(&reading(), 0).is_empty());
    }

    #[test]
    fn missing_ids_are_flagged_with_row_index() {
        let row = NormalizedReading {
            meter_id: String::new(),
            customer_id: String::new(),
            ..reading()
        };
        let reasons: Vec<_> = validate(&row, 4)
            .into_iter()
            .map(|issue| (issue.row_index, issue.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                (4, IssueReason::MissingMeterId),
                (4, IssueReason::MissingCustomerId)
            ]
        );
    }

    #[test]
    fn negative_value_is_flagged_zero_is_not() {
        let negative = NormalizedReading {
            reading_value: Some(-0.5),
            ..reading()
        };
        assert_eq!(
            validate(&negative, 0),
            vec![ValidationIssue {
                row_index: 0,
                field: CanonicalField::ReadingValue,
                reason: IssueReason::NegativeReadingValue,
            }]
        );
        let zero = NormalizedReading {
            reading_value: Some(-0.0),
            ..reading()
        };
        assert!(validate(&zero, 0).is_empty());
    }

    #[test]
    fn null_value_is_left_to_the_normalizer() {
        let row = NormalizedReading {
            reading_value: None,
            ..reading()
        };
        assert!(validate(&row, 0).is_empty());
    }
}
