//! The calculator form: mutable per-edit field state and the validated
//! snapshot handed to the converter.
//!
//! The form owns the raw text the user has typed plus the two currency
//! selectors. Edits pass through a character filter (digits and a single
//! decimal point); rejected edits leave the field untouched. A calculation
//! never reads the form directly: it takes an immutable [`EarningsInput`]
//! built by [`EarningsForm::snapshot`], constructed fresh per calculation.

use earnings_core::{Currency, EarningsInput};
use thiserror::Error;
use tracing::debug;

use crate::utils::{ParseDecimalError, is_partial_decimal, parse_decimal};

/// Identifies one editable numeric field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TotalEarnings,
    ServiceFeePercentage,
    GstPercentage,
    WithholdingTaxPercentage,
    WithdrawalFee,
    ExchangeRate,
}

impl Field {
    /// Human-readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TotalEarnings => "total earnings",
            Self::ServiceFeePercentage => "service fee percentage",
            Self::GstPercentage => "GST percentage",
            Self::WithholdingTaxPercentage => "withholding tax percentage",
            Self::WithdrawalFee => "withdrawal fee",
            Self::ExchangeRate => "exchange rate",
        }
    }
}

/// Errors produced when a snapshot cannot be built from the current form.
#[derive(Debug, Error)]
pub enum FormError {
    /// The exchange rate field is blank. The calculation must not run and
    /// no result is produced; the user is prompted for a rate instead.
    #[error("no exchange rate entered")]
    MissingExchangeRate,

    /// A field holds text the edit filter cannot prevent but the parser
    /// rejects, e.g. a lone decimal point.
    #[error("{field} is not a valid number")]
    InvalidNumber {
        field: &'static str,
        #[source]
        source: ParseDecimalError,
    },
}

/// The calculator form state.
///
/// Stock defaults: $750 gross, 10% service fee, 18% GST, 1% withholding
/// tax, $1 withdrawal fee, USD into INR, and no exchange rate until the
/// user supplies one.
#[derive(Debug, Clone)]
pub struct EarningsForm {
    total_earnings: String,
    service_fee_percentage: String,
    gst_percentage: String,
    withholding_tax_percentage: String,
    withdrawal_fee: String,
    exchange_rate: String,
    source_currency: Currency,
    destination_currency: Currency,
}

impl Default for EarningsForm {
    fn default() -> Self {
        Self {
            total_earnings: "750".to_string(),
            service_fee_percentage: "10".to_string(),
            gst_percentage: "18".to_string(),
            withholding_tax_percentage: "1".to_string(),
            withdrawal_fee: "1".to_string(),
            exchange_rate: String::new(),
            source_currency: Currency::Usd,
            destination_currency: Currency::Inr,
        }
    }
}

impl EarningsForm {
    /// Creates a form holding the stock defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces a field's text if the new text passes the edit filter.
    ///
    /// Returns `false` and leaves the field unchanged when the text
    /// contains anything beyond digits and a single decimal point. This is
    /// the silent-discard edit boundary: the rejection is reported to the
    /// caller and logged, never surfaced as an error.
    pub fn set(
        &mut self,
        field: Field,
        text: &str,
    ) -> bool {
        if !is_partial_decimal(text) {
            debug!(field = field.label(), text, "edit rejected by filter");
            return false;
        }
        *self.field_mut(field) = text.to_string();
        true
    }

    /// Current text of a field.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::TotalEarnings => &self.total_earnings,
            Field::ServiceFeePercentage => &self.service_fee_percentage,
            Field::GstPercentage => &self.gst_percentage,
            Field::WithholdingTaxPercentage => &self.withholding_tax_percentage,
            Field::WithdrawalFee => &self.withdrawal_fee,
            Field::ExchangeRate => &self.exchange_rate,
        }
    }

    pub fn set_currencies(
        &mut self,
        source: Currency,
        destination: Currency,
    ) {
        self.source_currency = source;
        self.destination_currency = destination;
    }

    pub fn source_currency(&self) -> Currency {
        self.source_currency
    }

    pub fn destination_currency(&self) -> Currency {
        self.destination_currency
    }

    /// Restores every field and both selectors to the stock defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Builds the validated immutable snapshot for one calculation.
    ///
    /// # Errors
    ///
    /// - [`FormError::MissingExchangeRate`] when the rate field is blank;
    ///   the calculation must not proceed.
    /// - [`FormError::InvalidNumber`] when a field holds unparseable text.
    ///
    /// Cleared amount and percentage fields parse as zero and simply
    /// contribute nothing.
    pub fn snapshot(&self) -> Result<EarningsInput, FormError> {
        if self.exchange_rate.trim().is_empty() {
            return Err(FormError::MissingExchangeRate);
        }

        Ok(EarningsInput {
            total_earnings: parse_field(Field::TotalEarnings, &self.total_earnings)?,
            service_fee_percentage: parse_field(
                Field::ServiceFeePercentage,
                &self.service_fee_percentage,
            )?,
            gst_percentage: parse_field(Field::GstPercentage, &self.gst_percentage)?,
            withholding_tax_percentage: parse_field(
                Field::WithholdingTaxPercentage,
                &self.withholding_tax_percentage,
            )?,
            withdrawal_fee: parse_field(Field::WithdrawalFee, &self.withdrawal_fee)?,
            exchange_rate: parse_field(Field::ExchangeRate, &self.exchange_rate)?,
        })
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::TotalEarnings => &mut self.total_earnings,
            Field::ServiceFeePercentage => &mut self.service_fee_percentage,
            Field::GstPercentage => &mut self.gst_percentage,
            Field::WithholdingTaxPercentage => &mut self.withholding_tax_percentage,
            Field::WithdrawalFee => &mut self.withdrawal_fee,
            Field::ExchangeRate => &mut self.exchange_rate,
        }
    }
}

fn parse_field(
    field: Field,
    text: &str,
) -> Result<rust_decimal::Decimal, FormError> {
    parse_decimal(text).map_err(|source| FormError::InvalidNumber {
        field: field.label(),
        source,
    })
}
