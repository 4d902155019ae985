//! Shared helpers for presenting calculation results.
//!
//! The conversion pipeline itself never rounds; values are carried at full
//! precision so chained computations stay exact. Rounding happens only when
//! an amount is formatted for display.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding.
///
/// Values at exactly 0.005 are rounded away from zero, following standard
/// financial rounding conventions.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use earnings_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(52893.454)), dec!(52893.45));
/// assert_eq!(round_half_up(dec!(52893.455)), dec!(52893.46));
/// assert_eq!(round_half_up(dec!(-13.505)), dec!(-13.51)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}
