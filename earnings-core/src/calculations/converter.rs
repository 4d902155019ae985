//! Deduction and conversion pipeline for freelance earnings.
//!
//! This module implements the calculation behind the earnings form: gross
//! income in the source currency, minus the platform's deductions, converted
//! into the amount deposited in the destination currency.
//!
//! # Pipeline Structure
//!
//! The calculation is a fixed five-step pipeline:
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Service fee: gross earnings × service fee % |
//! | 2    | GST on the service fee: service fee × GST % |
//! | 3    | Withholding tax: gross earnings × withholding tax % |
//! | 4    | Total deductions: steps 1-3 plus the flat withdrawal fee |
//! | 5    | Net earnings: (gross earnings − total deductions) × exchange rate |
//!
//! Every step multiplies or adds; nothing divides by user input, so a zero
//! percentage or fee simply contributes nothing. Intermediates are carried
//! at full precision; rounding to two decimal places happens only at
//! display time via [`common::round_half_up`](crate::calculations::common::round_half_up).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use earnings_core::{Currency, EarningsConverter, EarningsInput};
//!
//! let input = EarningsInput {
//!     total_earnings: dec!(750),
//!     service_fee_percentage: dec!(10),
//!     gst_percentage: dec!(18),
//!     withholding_tax_percentage: dec!(1),
//!     withdrawal_fee: dec!(1),
//!     exchange_rate: dec!(81),
//! };
//!
//! let converter = EarningsConverter::new(Currency::Usd, Currency::Inr);
//! let breakdown = converter.compute(&input).unwrap();
//!
//! assert_eq!(breakdown.total_deductions, dec!(97));
//! assert_eq!(breakdown.net_earnings, dec!(52893));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{Currency, EarningsInput, EarningsInputError};

/// Result of one conversion, with every intermediate line item.
///
/// All amounts except `net_earnings` are denominated in the source
/// currency; `net_earnings` is in the destination currency. Values are
/// unrounded. A breakdown is produced, rendered, and discarded; the next
/// calculation recomputes everything from scratch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsBreakdown {
    /// Platform service fee on gross earnings (step 1).
    pub service_fee: Decimal,

    /// GST charged on the service fee itself, not on gross earnings
    /// (step 2).
    pub gst_on_service_fee: Decimal,

    /// Tax withheld from gross earnings before payout (step 3).
    pub withholding_tax: Decimal,

    /// The flat withdrawal fee, passed through unchanged in the source
    /// currency (part of step 4).
    pub withdrawal_fee_charge: Decimal,

    /// Sum of all four deduction line items (step 4).
    pub total_deductions: Decimal,

    /// Amount deposited in the destination currency (step 5).
    pub net_earnings: Decimal,

    /// Display label for the deduction line items. Never affects the
    /// arithmetic.
    pub source_currency: Currency,

    /// Display label for the net deposit. Never affects the arithmetic.
    pub destination_currency: Currency,
}

/// Converter from gross earnings in one currency to the net amount
/// deposited in another.
///
/// The converter holds only the currency pair chosen in the form; those are
/// carried onto the breakdown as display labels. [`compute`] is pure and
/// deterministic, keeps no state between calls, and performs no I/O.
///
/// [`compute`]: EarningsConverter::compute
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use earnings_core::{Currency, EarningsConverter, EarningsInput};
///
/// let input = EarningsInput {
///     total_earnings: dec!(1000),
///     service_fee_percentage: dec!(0),
///     gst_percentage: dec!(0),
///     withholding_tax_percentage: dec!(0),
///     withdrawal_fee: dec!(0),
///     exchange_rate: dec!(1),
/// };
///
/// let converter = EarningsConverter::new(Currency::Usd, Currency::Usd);
/// let breakdown = converter.compute(&input).unwrap();
///
/// // With nothing deducted, the payout is gross × rate exactly.
/// assert_eq!(breakdown.net_earnings, dec!(1000));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EarningsConverter {
    source_currency: Currency,
    destination_currency: Currency,
}

impl EarningsConverter {
    /// Creates a converter for the given source/destination pair.
    pub fn new(
        source_currency: Currency,
        destination_currency: Currency,
    ) -> Self {
        Self {
            source_currency,
            destination_currency,
        }
    }

    /// Runs the full deduction/conversion pipeline on one input snapshot.
    ///
    /// This is the single entry point for a calculation. It validates the
    /// snapshot, computes each line item at full precision, and returns the
    /// complete breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsInputError`] if the snapshot violates the input
    /// domain (a negative amount or percentage, or a non-positive exchange
    /// rate). No partial result is produced on error.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use earnings_core::{Currency, EarningsConverter, EarningsInput};
    ///
    /// let input = EarningsInput {
    ///     total_earnings: dec!(750),
    ///     service_fee_percentage: dec!(10),
    ///     gst_percentage: dec!(18),
    ///     withholding_tax_percentage: dec!(1),
    ///     withdrawal_fee: dec!(1),
    ///     exchange_rate: dec!(81),
    /// };
    ///
    /// let converter = EarningsConverter::new(Currency::Usd, Currency::Inr);
    /// let breakdown = converter.compute(&input).unwrap();
    ///
    /// assert_eq!(breakdown.service_fee, dec!(75));
    /// assert_eq!(breakdown.gst_on_service_fee, dec!(13.5));
    /// assert_eq!(breakdown.withholding_tax, dec!(7.5));
    /// assert_eq!(breakdown.net_earnings, dec!(52893));
    /// ```
    pub fn compute(
        &self,
        input: &EarningsInput,
    ) -> Result<EarningsBreakdown, EarningsInputError> {
        input.validate()?;

        // Step 1: platform service fee on gross earnings
        let service_fee = self.service_fee(input.total_earnings, input.service_fee_percentage);

        // Step 2: GST applies to the fee, not to gross earnings
        let gst_on_service_fee = self.gst_on_service_fee(service_fee, input.gst_percentage);

        // Step 3: withholding tax on gross earnings
        let withholding_tax =
            self.withholding_tax(input.total_earnings, input.withholding_tax_percentage);

        // Step 4: all deductions, including the flat withdrawal fee
        let total_deductions = self.total_deductions(
            service_fee,
            gst_on_service_fee,
            withholding_tax,
            input.withdrawal_fee,
        );

        // Step 5: convert what remains into the destination currency
        let net_earnings =
            self.net_earnings(input.total_earnings, total_deductions, input.exchange_rate);

        Ok(EarningsBreakdown {
            service_fee,
            gst_on_service_fee,
            withholding_tax,
            withdrawal_fee_charge: input.withdrawal_fee,
            total_deductions,
            net_earnings,
            source_currency: self.source_currency,
            destination_currency: self.destination_currency,
        })
    }

    /// Step 1: gross earnings × service fee percentage.
    fn service_fee(
        &self,
        total_earnings: Decimal,
        service_fee_percentage: Decimal,
    ) -> Decimal {
        total_earnings * service_fee_percentage / Decimal::ONE_HUNDRED
    }

    /// Step 2: service fee × GST percentage.
    ///
    /// The base is the fee computed in step 1, so a zero service fee means
    /// zero GST regardless of the GST percentage.
    fn gst_on_service_fee(
        &self,
        service_fee: Decimal,
        gst_percentage: Decimal,
    ) -> Decimal {
        service_fee * gst_percentage / Decimal::ONE_HUNDRED
    }

    /// Step 3: gross earnings × withholding tax percentage.
    fn withholding_tax(
        &self,
        total_earnings: Decimal,
        withholding_tax_percentage: Decimal,
    ) -> Decimal {
        total_earnings * withholding_tax_percentage / Decimal::ONE_HUNDRED
    }

    /// Step 4: sum of the three computed deductions and the flat
    /// withdrawal fee.
    fn total_deductions(
        &self,
        service_fee: Decimal,
        gst_on_service_fee: Decimal,
        withholding_tax: Decimal,
        withdrawal_fee: Decimal,
    ) -> Decimal {
        service_fee + gst_on_service_fee + withholding_tax + withdrawal_fee
    }

    /// Step 5: remaining earnings × exchange rate.
    ///
    /// Deductions can legally exceed gross earnings (a small payout with a
    /// large withdrawal fee); the result is then negative and logged, not
    /// clamped.
    fn net_earnings(
        &self,
        total_earnings: Decimal,
        total_deductions: Decimal,
        exchange_rate: Decimal,
    ) -> Decimal {
        let remaining = total_earnings - total_deductions;
        if remaining < Decimal::ZERO {
            warn!(
                total_earnings = %total_earnings,
                total_deductions = %total_deductions,
                "deductions exceed gross earnings; net payout is negative"
            );
        }
        remaining * exchange_rate
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tracing_subscriber::fmt::format::FmtSpan;

    use super::*;

    /// The calculator's stock defaults:
    /// $750 gross, 10% fee, 18% GST, 1% withholding, $1 withdrawal, rate 81.
    fn reference_input() -> EarningsInput {
        EarningsInput {
            total_earnings: dec!(750),
            service_fee_percentage: dec!(10),
            gst_percentage: dec!(18),
            withholding_tax_percentage: dec!(1),
            withdrawal_fee: dec!(1),
            exchange_rate: dec!(81),
        }
    }

    fn usd_to_inr() -> EarningsConverter {
        EarningsConverter::new(Currency::Usd, Currency::Inr)
    }

    /// Initializes tracing subscriber for tests that exercise warn paths.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_span_events(FmtSpan::NONE)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    // =========================================================================
    // service_fee tests (step 1)
    // =========================================================================

    #[test]
    fn service_fee_applies_percentage_of_gross() {
        let converter = usd_to_inr();

        let result = converter.service_fee(dec!(750), dec!(10));

        assert_eq!(result, dec!(75));
    }

    #[test]
    fn service_fee_zero_percentage_contributes_nothing() {
        let converter = usd_to_inr();

        let result = converter.service_fee(dec!(750), dec!(0));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn service_fee_keeps_full_precision() {
        let converter = usd_to_inr();

        // 100.01 × 33% = 33.0033, carried unrounded
        let result = converter.service_fee(dec!(100.01), dec!(33));

        assert_eq!(result, dec!(33.0033));
    }

    // =========================================================================
    // gst_on_service_fee tests (step 2)
    // =========================================================================

    #[test]
    fn gst_applies_to_the_fee_not_to_gross() {
        let converter = usd_to_inr();

        // 18% of the $75 fee, not of the $750 gross
        let result = converter.gst_on_service_fee(dec!(75), dec!(18));

        assert_eq!(result, dec!(13.5));
    }

    #[test]
    fn gst_on_zero_fee_is_zero_regardless_of_percentage() {
        let converter = usd_to_inr();

        let result = converter.gst_on_service_fee(dec!(0), dec!(18));

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // withholding_tax tests (step 3)
    // =========================================================================

    #[test]
    fn withholding_tax_applies_percentage_of_gross() {
        let converter = usd_to_inr();

        let result = converter.withholding_tax(dec!(750), dec!(1));

        assert_eq!(result, dec!(7.5));
    }

    #[test]
    fn withholding_tax_zero_percentage_contributes_nothing() {
        let converter = usd_to_inr();

        let result = converter.withholding_tax(dec!(750), dec!(0));

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // total_deductions tests (step 4)
    // =========================================================================

    #[test]
    fn total_deductions_sums_all_four_line_items() {
        let converter = usd_to_inr();

        let result = converter.total_deductions(dec!(75), dec!(13.5), dec!(7.5), dec!(1));

        assert_eq!(result, dec!(97));
    }

    #[test]
    fn total_deductions_is_zero_when_every_item_is_zero() {
        let converter = usd_to_inr();

        let result = converter.total_deductions(dec!(0), dec!(0), dec!(0), dec!(0));

        assert_eq!(result, Decimal::ZERO);
    }

    // =========================================================================
    // net_earnings tests (step 5)
    // =========================================================================

    #[test]
    fn net_earnings_converts_the_remainder() {
        let converter = usd_to_inr();

        let result = converter.net_earnings(dec!(750), dec!(97), dec!(81));

        assert_eq!(result, dec!(52893));
    }

    #[test]
    fn net_earnings_goes_negative_when_deductions_exceed_gross() {
        let _guard = init_test_tracing();
        let converter = usd_to_inr();

        let result = converter.net_earnings(dec!(10), dec!(50), dec!(81));

        assert_eq!(result, dec!(-3240));
        // Warning is logged (captured by the test writer)
    }

    // =========================================================================
    // compute (integration) tests
    // =========================================================================

    #[test]
    fn compute_matches_the_reference_scenario() {
        let converter = usd_to_inr();

        let breakdown = converter.compute(&reference_input()).unwrap();

        assert_eq!(breakdown.service_fee, dec!(75));
        assert_eq!(breakdown.gst_on_service_fee, dec!(13.5));
        assert_eq!(breakdown.withholding_tax, dec!(7.5));
        assert_eq!(breakdown.withdrawal_fee_charge, dec!(1));
        assert_eq!(breakdown.total_deductions, dec!(97));
        // (750 − 97) × 81
        assert_eq!(breakdown.net_earnings, dec!(52893));
    }

    #[test]
    fn compute_with_no_deductions_returns_gross_times_rate() {
        let converter = EarningsConverter::new(Currency::Usd, Currency::Usd);
        let input = EarningsInput {
            total_earnings: dec!(1000),
            service_fee_percentage: dec!(0),
            gst_percentage: dec!(0),
            withholding_tax_percentage: dec!(0),
            withdrawal_fee: dec!(0),
            exchange_rate: dec!(1),
        };

        let breakdown = converter.compute(&input).unwrap();

        assert_eq!(breakdown.total_deductions, dec!(0));
        assert_eq!(breakdown.net_earnings, dec!(1000));
    }

    #[test]
    fn compute_carries_the_currency_pair_onto_the_breakdown() {
        let converter = EarningsConverter::new(Currency::Eur, Currency::Gbp);

        let breakdown = converter.compute(&reference_input()).unwrap();

        assert_eq!(breakdown.source_currency, Currency::Eur);
        assert_eq!(breakdown.destination_currency, Currency::Gbp);
    }

    #[test]
    fn currency_labels_never_affect_the_arithmetic() {
        let input = reference_input();

        let inr = usd_to_inr().compute(&input).unwrap();
        let cad = EarningsConverter::new(Currency::Aud, Currency::Cad)
            .compute(&input)
            .unwrap();

        assert_eq!(inr.net_earnings, cad.net_earnings);
        assert_eq!(inr.total_deductions, cad.total_deductions);
    }

    #[test]
    fn compute_rejects_invalid_input_without_a_partial_result() {
        let converter = usd_to_inr();
        let input = EarningsInput {
            total_earnings: dec!(-750),
            ..reference_input()
        };

        let result = converter.compute(&input);

        assert_eq!(
            result,
            Err(EarningsInputError::NegativeTotalEarnings(dec!(-750)))
        );
    }

    #[test]
    fn compute_is_deterministic_across_calls() {
        let converter = usd_to_inr();
        let input = reference_input();

        let first = converter.compute(&input).unwrap();
        let second = converter.compute(&input).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn compute_keeps_intermediates_unrounded() {
        let converter = usd_to_inr();
        let input = EarningsInput {
            total_earnings: dec!(100.01),
            service_fee_percentage: dec!(33),
            gst_percentage: dec!(18),
            withholding_tax_percentage: dec!(0),
            withdrawal_fee: dec!(0),
            exchange_rate: dec!(1),
        };

        let breakdown = converter.compute(&input).unwrap();

        // 33.0033 × 18% = 5.940594, no rounding anywhere in the pipeline
        assert_eq!(breakdown.service_fee, dec!(33.0033));
        assert_eq!(breakdown.gst_on_service_fee, dec!(5.940594));
    }

    #[test]
    fn doubling_gross_doubles_the_payout_when_withdrawal_fee_is_zero() {
        let converter = usd_to_inr();
        let base = EarningsInput {
            withdrawal_fee: dec!(0),
            ..reference_input()
        };
        let doubled = EarningsInput {
            total_earnings: base.total_earnings * dec!(2),
            ..base.clone()
        };

        let base_net = converter.compute(&base).unwrap().net_earnings;
        let doubled_net = converter.compute(&doubled).unwrap().net_earnings;

        assert_eq!(doubled_net, base_net * dec!(2));
    }

    #[test]
    fn payout_is_linear_in_the_exchange_rate() {
        let converter = usd_to_inr();
        let at_81 = reference_input();
        let at_162 = EarningsInput {
            exchange_rate: dec!(162),
            ..reference_input()
        };

        let net_81 = converter.compute(&at_81).unwrap().net_earnings;
        let net_162 = converter.compute(&at_162).unwrap().net_earnings;

        assert_eq!(net_162, net_81 * dec!(2));
    }

    #[test]
    fn raising_any_percentage_never_lowers_total_deductions() {
        let converter = usd_to_inr();
        let base = converter.compute(&reference_input()).unwrap();

        let higher_fee = EarningsInput {
            service_fee_percentage: dec!(11),
            ..reference_input()
        };
        let higher_gst = EarningsInput {
            gst_percentage: dec!(19),
            ..reference_input()
        };
        let higher_withholding = EarningsInput {
            withholding_tax_percentage: dec!(2),
            ..reference_input()
        };
        let higher_withdrawal = EarningsInput {
            withdrawal_fee: dec!(2),
            ..reference_input()
        };

        for raised in [
            higher_fee,
            higher_gst,
            higher_withholding,
            higher_withdrawal,
        ] {
            let breakdown = converter.compute(&raised).unwrap();
            assert!(breakdown.total_deductions > base.total_deductions);
            assert!(breakdown.total_deductions >= Decimal::ZERO);
        }
    }

    #[test]
    fn compute_handles_deductions_exceeding_gross() {
        let _guard = init_test_tracing();
        let converter = usd_to_inr();
        let input = EarningsInput {
            total_earnings: dec!(10),
            service_fee_percentage: dec!(10),
            gst_percentage: dec!(0),
            withholding_tax_percentage: dec!(0),
            withdrawal_fee: dec!(50),
            exchange_rate: dec!(2),
        };

        let breakdown = converter.compute(&input).unwrap();

        // (10 − 51) × 2; negative payouts are reported, not clamped
        assert_eq!(breakdown.total_deductions, dec!(51));
        assert_eq!(breakdown.net_earnings, dec!(-82));
    }
}
