use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when an input snapshot falls outside the documented
/// domain: amounts and percentages must be non-negative, and the exchange
/// rate must be strictly positive.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EarningsInputError {
    /// Gross earnings must be non-negative.
    #[error("total earnings must be non-negative, got {0}")]
    NegativeTotalEarnings(Decimal),

    /// The service fee percentage must be non-negative.
    #[error("service fee percentage must be non-negative, got {0}")]
    NegativeServiceFeePercentage(Decimal),

    /// The GST percentage must be non-negative.
    #[error("GST percentage must be non-negative, got {0}")]
    NegativeGstPercentage(Decimal),

    /// The withholding tax percentage must be non-negative.
    #[error("withholding tax percentage must be non-negative, got {0}")]
    NegativeWithholdingTaxPercentage(Decimal),

    /// The withdrawal fee must be non-negative.
    #[error("withdrawal fee must be non-negative, got {0}")]
    NegativeWithdrawalFee(Decimal),

    /// The exchange rate must be strictly positive.
    #[error("exchange rate must be positive, got {0}")]
    NonPositiveExchangeRate(Decimal),
}

/// An immutable snapshot of the calculator form at the moment the user
/// requested a calculation.
///
/// The front end owns the mutable per-keystroke field state; a fresh
/// snapshot is constructed for every calculation and discarded afterwards,
/// so no value here carries state between calls.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use earnings_core::EarningsInput;
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
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsInput {
    /// Gross amount earned, in the source currency.
    pub total_earnings: Decimal,

    /// Percentage of gross earnings retained by the platform as its
    /// service fee.
    pub service_fee_percentage: Decimal,

    /// Percentage of the service fee charged as tax on that fee. Applies
    /// to the fee itself, not to gross earnings.
    pub gst_percentage: Decimal,

    /// Percentage of gross earnings withheld as tax before payout.
    pub withholding_tax_percentage: Decimal,

    /// Flat fee charged on moving funds out, in the source currency.
    /// Deducted before conversion, never converted itself.
    pub withdrawal_fee: Decimal,

    /// Destination-currency units per source-currency unit. Supplied by
    /// the user; never looked up.
    pub exchange_rate: Decimal,
}

impl EarningsInput {
    /// Validates the snapshot against the documented input domain.
    ///
    /// # Errors
    ///
    /// Returns [`EarningsInputError`] if:
    /// - any amount or percentage is negative
    /// - the exchange rate is zero or negative
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use earnings_core::{EarningsInput, EarningsInputError};
    ///
    /// let input = EarningsInput {
    ///     total_earnings: dec!(750),
    ///     service_fee_percentage: dec!(10),
    ///     gst_percentage: dec!(18),
    ///     withholding_tax_percentage: dec!(1),
    ///     withdrawal_fee: dec!(1),
    ///     exchange_rate: dec!(0),
    /// };
    ///
    /// assert_eq!(
    ///     input.validate(),
    ///     Err(EarningsInputError::NonPositiveExchangeRate(dec!(0)))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), EarningsInputError> {
        if self.total_earnings < Decimal::ZERO {
            return Err(EarningsInputError::NegativeTotalEarnings(
                self.total_earnings,
            ));
        }
        if self.service_fee_percentage < Decimal::ZERO {
            return Err(EarningsInputError::NegativeServiceFeePercentage(
                self.service_fee_percentage,
            ));
        }
        if self.gst_percentage < Decimal::ZERO {
            return Err(EarningsInputError::NegativeGstPercentage(
                self.gst_percentage,
            ));
        }
        if self.withholding_tax_percentage < Decimal::ZERO {
            return Err(EarningsInputError::NegativeWithholdingTaxPercentage(
                self.withholding_tax_percentage,
            ));
        }
        if self.withdrawal_fee < Decimal::ZERO {
            return Err(EarningsInputError::NegativeWithdrawalFee(
                self.withdrawal_fee,
            ));
        }
        if self.exchange_rate <= Decimal::ZERO {
            return Err(EarningsInputError::NonPositiveExchangeRate(
                self.exchange_rate,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    /// The calculator's stock default values.
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

    #[test]
    fn validate_accepts_reference_values() {
        let result = reference_input().validate();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn validate_accepts_all_zero_deductions() {
        let input = EarningsInput {
            service_fee_percentage: dec!(0),
            gst_percentage: dec!(0),
            withholding_tax_percentage: dec!(0),
            withdrawal_fee: dec!(0),
            exchange_rate: dec!(1),
            ..reference_input()
        };

        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_negative_total_earnings() {
        let input = EarningsInput {
            total_earnings: dec!(-750),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeTotalEarnings(dec!(-750)))
        );
    }

    #[test]
    fn validate_rejects_negative_service_fee_percentage() {
        let input = EarningsInput {
            service_fee_percentage: dec!(-10),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeServiceFeePercentage(dec!(-10)))
        );
    }

    #[test]
    fn validate_rejects_negative_gst_percentage() {
        let input = EarningsInput {
            gst_percentage: dec!(-0.5),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeGstPercentage(dec!(-0.5)))
        );
    }

    #[test]
    fn validate_rejects_negative_withholding_tax_percentage() {
        let input = EarningsInput {
            withholding_tax_percentage: dec!(-1),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeWithholdingTaxPercentage(dec!(
                -1
            )))
        );
    }

    #[test]
    fn validate_rejects_negative_withdrawal_fee() {
        let input = EarningsInput {
            withdrawal_fee: dec!(-1),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeWithdrawalFee(dec!(-1)))
        );
    }

    #[test]
    fn validate_rejects_zero_exchange_rate() {
        let input = EarningsInput {
            exchange_rate: dec!(0),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NonPositiveExchangeRate(dec!(0)))
        );
    }

    #[test]
    fn validate_rejects_negative_exchange_rate() {
        let input = EarningsInput {
            exchange_rate: dec!(-81),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NonPositiveExchangeRate(dec!(-81)))
        );
    }

    #[test]
    fn validate_reports_the_first_violation_in_field_order() {
        let input = EarningsInput {
            total_earnings: dec!(-1),
            exchange_rate: dec!(0),
            ..reference_input()
        };

        assert_eq!(
            input.validate(),
            Err(EarningsInputError::NegativeTotalEarnings(dec!(-1)))
        );
    }
}
