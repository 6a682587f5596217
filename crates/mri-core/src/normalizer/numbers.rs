//! Reading-value parsing under decimal-separator ambiguity.

use std::borrow::Cow;

/// Parse a raw reading value.
///
/// A lone comma is read as the decimal separator when no period is present
/// (`12,5` → 12.5). Anything else with a comma (`1,234.5`, `1,2,3`) is left
/// untouched and fails to parse. Non-finite results are rejected.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        Cow::Owned(trimmed.replacen(',', ".", 1))
    } else {
        Cow::Borrowed(trimmed)
    };
    candidate.parse::<f64>().ok().filter(|value| value.is_finite())
}
