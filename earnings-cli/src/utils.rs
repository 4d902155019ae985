use std::sync::LazyLock;

use earnings_core::Currency;
use earnings_core::calculations::common::round_half_up;
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// The edit-boundary pattern: digits with at most one decimal point.
/// Matches partial input ("12.", ".") so typing is never interrupted.
static PARTIAL_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d*$").expect("hard-coded pattern compiles"));

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid number '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Whether `text` is acceptable in a numeric form field mid-edit.
///
/// Empty text is acceptable (the user cleared the field). Anything beyond
/// digits and a single decimal point is not, and the edit that produced it
/// should be discarded.
pub fn is_partial_decimal(text: &str) -> bool {
    PARTIAL_DECIMAL.is_match(text)
}

/// Normalizes input for decimal parsing: trims whitespace and removes
/// commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a field's text into a [`Decimal`].
///
/// Empty or whitespace-only input is treated as 0 (a cleared field
/// contributes nothing). Returns an error and logs when the input is
/// non-empty but not parseable, e.g. a lone decimal point.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid decimal: {}", e);
        ParseDecimalError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Formats an amount for display: the currency symbol and the value
/// rounded to two decimal places, with the sign leading the symbol.
pub fn format_currency(
    amount: Decimal,
    currency: Currency,
) -> String {
    let rounded = round_half_up(amount);
    if rounded.is_sign_negative() {
        format!("-{}{:.2}", currency.symbol(), -rounded)
    } else {
        format!("{}{:.2}", currency.symbol(), rounded)
    }
}
