//! CSV loader for batch earnings scenarios.
//!
//! ## CSV Format
//!
//! The expected CSV format uses the following columns. Column order does
//! **not** matter (headers are matched by name). All header names are
//! case-sensitive and must match exactly.
//!
//! | Column                       | Required | Type    | Notes                                   |
//! |------------------------------|----------|---------|-----------------------------------------|
//! | `label`                      | no       | string  | Scenario name echoed in the output      |
//! | `total_earnings`             | yes      | decimal | Gross amount in the source currency     |
//! | `service_fee_percentage`     | yes      | decimal | e.g. `10`                               |
//! | `gst_percentage`             | yes      | decimal | Applies to the service fee              |
//! | `withholding_tax_percentage` | yes      | decimal | Applies to gross earnings               |
//! | `withdrawal_fee`             | yes      | decimal | Flat, in the source currency            |
//! | `exchange_rate`              | yes      | decimal | Must not be blank                       |
//! | `source_currency`            | no       | string  | ISO code; defaults to `USD`             |
//! | `destination_currency`       | no       | string  | ISO code; defaults to `INR`             |
//!
//! ### Minimal example
//!
//! ```csv
//! total_earnings,service_fee_percentage,gst_percentage,withholding_tax_percentage,withdrawal_fee,exchange_rate
//! 750,10,18,1,1,81
//! ```

use earnings_core::{Currency, EarningsInput};
use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: Option<String>,
    total_earnings: Decimal,
    service_fee_percentage: Decimal,
    gst_percentage: Decimal,
    withholding_tax_percentage: Decimal,
    withdrawal_fee: Decimal,
    exchange_rate: Option<Decimal>,
    source_currency: Option<String>,
    destination_currency: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// required column, type mismatch, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// An `exchange_rate` cell was left blank. A scenario without a rate
    /// cannot be computed. `usize` is the 1-based row number (header =
    /// row 0).
    #[error("exchange rate is empty on row {row}")]
    MissingExchangeRate { row: usize },

    /// A currency cell contained a code that is not one of the supported
    /// codes.
    #[error("unrecognised currency code '{code}' on row {row}")]
    InvalidCurrency { code: String, row: usize },
}

/// One batch calculation request: an input snapshot plus its currency pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsScenario {
    pub label: Option<String>,
    pub source_currency: Currency,
    pub destination_currency: Currency,
    pub input: EarningsInput,
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into an EarningsScenario.
///
/// row_number is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<EarningsScenario, CsvLoadError> {
    let exchange_rate = row
        .exchange_rate
        .ok_or(CsvLoadError::MissingExchangeRate { row: row_number })?;

    let source_currency = convert_currency_cell(row.source_currency, Currency::Usd, row_number)?;
    let destination_currency =
        convert_currency_cell(row.destination_currency, Currency::Inr, row_number)?;

    Ok(EarningsScenario {
        label: row.label.filter(|l| !l.is_empty()),
        source_currency,
        destination_currency,
        input: EarningsInput {
            total_earnings: row.total_earnings,
            service_fee_percentage: row.service_fee_percentage,
            gst_percentage: row.gst_percentage,
            withholding_tax_percentage: row.withholding_tax_percentage,
            withdrawal_fee: row.withdrawal_fee,
            exchange_rate,
        },
    })
}

/// An absent column or blank cell falls back to the default pair.
fn convert_currency_cell(
    cell: Option<String>,
    default: Currency,
    row_number: usize,
) -> Result<Currency, CsvLoadError> {
    match cell {
        None => Ok(default),
        Some(code) if code.is_empty() => Ok(default),
        Some(code) => Currency::parse(&code).ok_or(CsvLoadError::InvalidCurrency {
            code,
            row: row_number,
        }),
    }
}

/// Parse CSV text (the full file contents as a &str) and return a vector of
/// EarningsScenario. Rows are returned in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid or a
///   required field cannot be deserialised.
/// * [CsvLoadError::MissingExchangeRate] – if any row leaves the
///   `exchange_rate` cell blank.
/// * [CsvLoadError::InvalidCurrency] – if any row contains an
///   unrecognised currency code.
pub fn load_from_str(input: &str) -> Result<Vec<EarningsScenario>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            let row_number = idx + 1; // 1-based for user-facing messages
            convert_row(row, row_number)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to
/// [load_from_str].
///
/// # Errors
///
/// Returns an io::Error when the file cannot be read, or a [CsvLoadError]
/// when the contents are invalid.
pub fn load_from_file(
    path: &std::path::Path
) -> Result<Vec<EarningsScenario>, Box<dyn std::error::Error + Send + Sync>> {
    let contents = std::fs::read_to_string(path)?;
    let scenarios = load_from_str(&contents)?;
    Ok(scenarios)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
