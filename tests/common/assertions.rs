//! Domain-specific assertion macros for mri harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* row and field carried the unexpected diagnostic.

use mri_core::{CanonicalField, ImportResult, IssueReason};

// ---------------------------------------------------------------------------
// Issue assertions
// ---------------------------------------------------------------------------

/// Assert that an `ImportResult` carries an issue for `row` with `reason`.
///
/// ```rust
/// assert_issue!(result, 2, IssueReason::UnparsableDate);
/// ```
#[macro_export]
macro_rules! assert_issue {
    ($result:expr, $row:expr, $reason:expr) => {{
        let result: &mri_core::ImportResult = &$result;
        let row: usize = $row;
        let reason: mri_core::IssueReason = $reason;
        if !result
            .issues
            .iter()
            .any(|issue| issue.row_index == row && issue.reason == reason)
        {
            panic!(
                "assert_issue! failed: no {} on row {}.\n  issues: {:#?}",
                reason, row, result.issues
            );
        }
    }};
}

/// Assert that a row has no issues at all.
#[macro_export]
macro_rules! assert_clean_row {
    ($result:expr, $row:expr) => {{
        let result: &mri_core::ImportResult = &$result;
        let row: usize = $row;
        let found: Vec<_> = result.issues_for_row(row).collect();
        if !found.is_empty() {
            panic!(
                "assert_clean_row! failed: row {} has issues {:#?}\n  row: {:#?}",
                row, found, result.rows[row]
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Mapping assertions
// ---------------------------------------------------------------------------

/// Assert that a canonical field was mapped to a named source header.
///
/// ```rust
/// assert_mapped!(result.detected_mapping, CanonicalField::MeterId, "id_compteur");
/// ```
#[macro_export]
macro_rules! assert_mapped {
    ($mapping:expr, $field:expr, $header:expr) => {{
        let mapping: &mri_core::MappingSpec = &$mapping;
        let field: mri_core::CanonicalField = $field;
        let expected = mri_core::SourceColumn::Name(String::from($header));
        match mapping.get(field) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_mapped! failed for {}:\n  expected: {}\n  actual:   {}",
                field, expected, actual
            ),
            None => panic!(
                "assert_mapped! failed: {} is unmapped.\n  mapping: {:?}",
                field, mapping
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Result invariant helpers
// ---------------------------------------------------------------------------

/// Invariants every import result must satisfy: one row per record, issue
/// row indexes in range and non-decreasing.
pub fn assert_result_invariants(result: &ImportResult, record_count: usize) {
    assert_eq!(
        result.rows.len(),
        record_count,
        "row count must equal record count"
    );
    let mut previous = 0;
    for issue in &result.issues {
        assert!(
            issue.row_index < record_count,
            "issue row index out of range: {issue}"
        );
        assert!(
            issue.row_index >= previous,
            "issues must be in discovery order: {issue} after row {previous}"
        );
        previous = issue.row_index;
    }
}

/// Reasons recorded for one row, in discovery order.
pub fn reasons_for_row(result: &ImportResult, row: usize) -> Vec<(CanonicalField, IssueReason)> {
    result
        .issues_for_row(row)
        .map(|issue| (issue.field, issue.reason))
        .collect()
}
