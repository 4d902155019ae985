//! Plain-text rendering of calculation results.
//!
//! Rendering is where rounding happens: every amount is formatted to two
//! decimal places with its currency symbol. Deduction line items are shown
//! in the source currency, the net deposit in the destination currency.

use earnings_core::EarningsBreakdown;

use crate::utils::format_currency;

/// External rate-lookup page suggested when no exchange rate has been
/// entered. The calculator never fetches a rate itself; the rate is always
/// typed in by the user.
pub const RATE_LOOKUP_URL: &str = "https://www.xe.com/currencyconverter/";

/// The single-line result shown after every calculation.
pub fn render_summary(breakdown: &EarningsBreakdown) -> String {
    format!(
        "Net amount deposited in your bank account: {}",
        format_currency(breakdown.net_earnings, breakdown.destination_currency)
    )
}

/// The full deduction breakdown, one line item per row.
pub fn render_breakdown(breakdown: &EarningsBreakdown) -> String {
    let source = breakdown.source_currency;
    [
        format!(
            "Service fee:        {}",
            format_currency(breakdown.service_fee, source)
        ),
        format!(
            "GST on service fee: {}",
            format_currency(breakdown.gst_on_service_fee, source)
        ),
        format!(
            "Withholding tax:    {}",
            format_currency(breakdown.withholding_tax, source)
        ),
        format!(
            "Withdrawal fee:     {}",
            format_currency(breakdown.withdrawal_fee_charge, source)
        ),
        format!(
            "Total deductions:   {}",
            format_currency(breakdown.total_deductions, source)
        ),
        format!(
            "Net deposited:      {}",
            format_currency(breakdown.net_earnings, breakdown.destination_currency)
        ),
    ]
    .join("\n")
}

/// One line of batch output: the scenario's label and its net deposit.
pub fn render_batch_line(
    label: &str,
    breakdown: &EarningsBreakdown,
) -> String {
    format!(
        "{label}: {}",
        format_currency(breakdown.net_earnings, breakdown.destination_currency)
    )
}
