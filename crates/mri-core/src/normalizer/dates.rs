//! Reading-date parsing as an ordered list of strategies.
//!
//! Each [`DateStrategy`] either yields a structurally valid calendar date or
//! declines. [`parse_date`] tries them in [`DateStrategy::ORDER`] and keeps the
//! first success, so `01/02/2024` is read day-first as 1 February.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use regex::Regex;
use std::sync::LazyLock;

static YEAR_FIRST_DASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("valid date regex"));
static YEAR_FIRST_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})/(\d{1,2})/(\d{1,2})$").expect("valid date regex"));
static YEAR_LAST_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid date regex"));
static EPOCH_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d{1,12}$").expect("valid epoch regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStrategy {
    /// `YYYY-MM-DD`
    Iso,
    /// `DD/MM/YYYY`
    DayMonthYear,
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `YYYY/MM/DD`
    YearMonthDay,
    /// Integer seconds since 1970-01-01 UTC.
    EpochSeconds,
}

impl DateStrategy {
    pub const ORDER: [DateStrategy; 5] = [
        DateStrategy::Iso,
        DateStrategy::DayMonthYear,
        DateStrategy::MonthDayYear,
        DateStrategy::YearMonthDay,
        DateStrategy::EpochSeconds,
    ];

    pub fn parse(self, raw: &str) -> Option<NaiveDate> {
        match self {
            DateStrategy::Iso => {
                let [y, m, d] = parts(&YEAR_FIRST_DASH, raw)?;
                calendar(y, m, d)
            }
            DateStrategy::DayMonthYear => {
                let [d, m, y] = parts(&YEAR_LAST_SLASH, raw)?;
                calendar(y, m, d)
            }
            DateStrategy::MonthDayYear => {
                let [m, d, y] = parts(&YEAR_LAST_SLASH, raw)?;
                calendar(y, m, d)
            }
            DateStrategy::YearMonthDay => {
                let [y, m, d] = parts(&YEAR_FIRST_SLASH, raw)?;
                calendar(y, m, d)
            }
            DateStrategy::EpochSeconds => {
                if !EPOCH_SECONDS.is_match(raw) {
                    return None;
                }
                let secs: i64 = raw.parse().ok()?;
                DateTime::<Utc>::from_timestamp(secs, 0)
                    .map(|ts| ts.date_naive())
                    .filter(four_digit_year)
            }
        }
    }
}

/// Parse a raw reading date. A caller-supplied strftime `preferred` format is
/// tried before the fixed strategy list.
pub fn parse_date(raw: &str, preferred: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Some(format) = preferred {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            if four_digit_year(&date) {
                return Some(date);
            }
        }
    }
    DateStrategy::ORDER
        .into_iter()
        .find_map(|strategy| strategy.parse(raw))
}

fn parts(pattern: &Regex, raw: &str) -> Option<[u32; 3]> {
    let caps = pattern.captures(raw)?;
    let mut out = [0u32; 3];
    for (slot, group) in out.iter_mut().zip(1..=3) {
        *slot = caps.get(group)?.as_str().parse().ok()?;
    }
    Some(out)
}

fn calendar(year: u32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day).filter(four_digit_year)
}

/// Canonical output is `YYYY-MM-DD`; anything outside years 0000-9999 cannot
/// be written back in that form.
fn four_digit_year(date: &NaiveDate) -> bool {
    (0..=9999).contains(&date.year())
}
