//! Core types for mri-core — Meter Reading Import.
//!
//! This module defines the data shared across all pipeline stages: the closed
//! [`CanonicalField`] enumeration, the raw input side ([`RawRecord`],
//! [`RawValue`]), the resolved [`MappingSpec`], the typed output
//! ([`NormalizedReading`]) and the diagnostics ([`ValidationIssue`]).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Canonical fields
// ---------------------------------------------------------------------------

/// One of the six fixed output columns every import normalises into.
///
/// Variants are declared in canonical column order, so the derived `Ord` (and
/// therefore any `BTreeMap` keyed by field) follows export order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    MeterId,
    CustomerId,
    ReadingValue,
    ReadingDate,
    Unit,
    SourceSystem,
}

impl CanonicalField {
    /// All canonical fields in export column order.
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::MeterId,
        CanonicalField::CustomerId,
        CanonicalField::ReadingValue,
        CanonicalField::ReadingDate,
        CanonicalField::Unit,
        CanonicalField::SourceSystem,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::MeterId => "meter_id",
            CanonicalField::CustomerId => "customer_id",
            CanonicalField::ReadingValue => "reading_value",
            CanonicalField::ReadingDate => "reading_date",
            CanonicalField::Unit => "unit",
            CanonicalField::SourceSystem => "source_system",
        }
    }

    /// Fields whose absence is reported as a `MISSING_*` issue.
    pub fn is_required(self) -> bool {
        matches!(self, CanonicalField::MeterId | CanonicalField::CustomerId)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("unknown canonical field: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A single cell as handed over by the container parser.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawValue {
    /// Textual form of the value. `Null` reads as the empty string; floats use
    /// the shortest representation that parses back to the same value.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            RawValue::Null => Cow::Borrowed(""),
            RawValue::Bool(b) => Cow::Owned(b.to_string()),
            RawValue::Integer(i) => Cow::Owned(i.to_string()),
            RawValue::Float(f) => Cow::Owned(f.to_string()),
            RawValue::Text(s) => Cow::Borrowed(s),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.to_text().trim().is_empty()
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Integer(i)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// One input row: source header → raw value, in source column order.
///
/// Records are immutable once produced by the container parser. Sparse rows
/// (JSON objects missing a key, short CSV lines) simply lack the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    cells: Vec<(String, RawValue)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell. Used by container parsers while building a record.
    pub fn push(&mut self, header: impl Into<String>, value: impl Into<RawValue>) {
        self.cells.push((header.into(), value.into()));
    }

    /// Value under `header`. With duplicate headers the first one wins.
    pub fn get(&self, header: &str) -> Option<&RawValue> {
        self.cells
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value)
    }

    /// Value at column position `index`.
    pub fn get_index(&self, index: usize) -> Option<&RawValue> {
        self.cells.get(index).map(|(_, value)| value)
    }

    /// Resolve a mapped [`SourceColumn`] against this record.
    pub fn lookup(&self, column: &SourceColumn) -> Option<&RawValue> {
        match column {
            SourceColumn::Name(name) => self.get(name),
            SourceColumn::Index(index) => self.get_index(*index),
        }
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping
// ---------------------------------------------------------------------------

/// Where a canonical field's value comes from: a header name or a column index.
///
/// Serialised untagged, so mapping files may use `"Compteur"` or `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceColumn {
    Index(usize),
    Name(String),
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceColumn::Name(name) => write!(f, "{name:?}"),
            SourceColumn::Index(index) => write!(f, "#{index}"),
        }
    }
}

impl From<&str> for SourceColumn {
    fn from(s: &str) -> Self {
        SourceColumn::Name(s.to_string())
    }
}

impl From<String> for SourceColumn {
    fn from(s: String) -> Self {
        SourceColumn::Name(s)
    }
}

impl From<usize> for SourceColumn {
    fn from(index: usize) -> Self {
        SourceColumn::Index(index)
    }
}

/// Canonical field → source column. Fields without an entry are unmapped and
/// read as empty downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingSpec {
    columns: BTreeMap<CanonicalField, SourceColumn>,
}

impl MappingSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: CanonicalField, column: impl Into<SourceColumn>) -> Self {
        self.insert(field, column);
        self
    }

    pub fn insert(&mut self, field: CanonicalField, column: impl Into<SourceColumn>) {
        self.columns.insert(field, column.into());
    }

    pub fn get(&self, field: CanonicalField) -> Option<&SourceColumn> {
        self.columns.get(&field)
    }

    pub fn is_mapped(&self, field: CanonicalField) -> bool {
        self.columns.contains_key(&field)
    }

    /// Canonical fields with no source column, in canonical order.
    pub fn unmapped(&self) -> impl Iterator<Item = CanonicalField> + '_ {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| !self.is_mapped(*field))
    }

    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &SourceColumn)> {
        self.columns.iter().map(|(field, column)| (*field, column))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(CanonicalField, SourceColumn)> for MappingSpec {
    fn from_iter<I: IntoIterator<Item = (CanonicalField, SourceColumn)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalised output
// ---------------------------------------------------------------------------

/// One row in the canonical schema.
///
/// `reading_value` and `reading_date` are `None` when the raw value could not
/// be parsed; the matching issue is recorded alongside.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedReading {
    pub meter_id: String,
    pub customer_id: String,
    pub reading_value: Option<f64>,
    /// Serialised as `YYYY-MM-DD`.
    pub reading_date: Option<NaiveDate>,
    pub unit: String,
    pub source_system: String,
}

impl NormalizedReading {
    /// `reading_date` in canonical `YYYY-MM-DD` form.
    pub fn reading_date_iso(&self) -> Option<String> {
        self.reading_date
            .map(|date| date.format("%Y-%m-%d").to_string())
    }
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Why a row was flagged. Issues never remove a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueReason {
    MissingMeterId,
    MissingCustomerId,
    UnparsableNumber,
    UnparsableDate,
    NegativeReadingValue,
}

impl IssueReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueReason::MissingMeterId => "MISSING_METER_ID",
            IssueReason::MissingCustomerId => "MISSING_CUSTOMER_ID",
            IssueReason::UnparsableNumber => "UNPARSABLE_NUMBER",
            IssueReason::UnparsableDate => "UNPARSABLE_DATE",
            IssueReason::NegativeReadingValue => "NEGATIVE_READING_VALUE",
        }
    }
}

impl fmt::Display for IssueReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An issue raised while normalising a single record, before the orchestrator
/// knows which row it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: CanonicalField,
    pub reason: IssueReason,
}

impl FieldIssue {
    pub fn new(field: CanonicalField, reason: IssueReason) -> Self {
        Self { field, reason }
    }

    pub fn at_row(self, row_index: usize) -> ValidationIssue {
        ValidationIssue {
            row_index,
            field: self.field,
            reason: self.reason,
        }
    }
}

/// A non-fatal, per-row, per-field diagnostic. `row_index` is zero-based over
/// the records handed to the importer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row_index: usize,
    pub field: CanonicalField,
    pub reason: IssueReason,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {} ({})", self.row_index, self.reason, self.field)
    }
}

// ---------------------------------------------------------------------------
// Import result
// ---------------------------------------------------------------------------

/// Everything one import invocation produced. A plain value; nothing here is
/// shared with other invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResult {
    /// One row per input record, in input order.
    pub rows: Vec<NormalizedReading>,
    /// Issues in discovery order.
    pub issues: Vec<ValidationIssue>,
    /// The mapping actually used (echoed back in explicit mode).
    pub detected_mapping: MappingSpec,
}

impl ImportResult {
    pub fn issues_for_row(&self, row_index: usize) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.row_index == row_index)
    }

    pub fn summary(&self) -> ImportSummary {
        let flagged = self
            .issues
            .iter()
            .map(|issue| issue.row_index)
            .collect::<BTreeSet<_>>()
            .len();
        ImportSummary {
            total: self.rows.len(),
            clean: self.rows.len() - flagged,
            flagged,
            issues: self.issues.len(),
        }
    }
}

/// Row and issue counts for operator-facing reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total: usize,
    pub clean: usize,
    pub flagged: usize,
    pub issues: usize,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Imported {} readings ({} flagged, {} issues)",
            self.total, self.flagged, self.issues
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
