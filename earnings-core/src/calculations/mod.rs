//! Earnings conversion pipeline.
//!
//! This module provides the deduction and currency-conversion arithmetic
//! behind the calculator, together with the shared presentation rounding.

pub mod common;
pub mod converter;

pub use converter::{EarningsBreakdown, EarningsConverter};
