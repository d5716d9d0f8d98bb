use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Rate, TermFrequency};

const PERCENT: Decimal = dec!(100);

/// Normalize a nominal annual rate quoted as a percentage (6.3 = 6.3%)
/// into the per-period decimal rate for the given repayment frequency:
/// `(rate / 100) / periods_per_year`.
///
/// Pure and deterministic; the same inputs always yield the same rate.
/// The result doubles as the default interest-paid scale applied to the
/// balance each period (see `schedule::build_schedule`).
pub fn periodic_rate(nominal_annual_rate: Rate, frequency: TermFrequency) -> Rate {
    nominal_annual_rate / PERCENT / Decimal::from(frequency.periods_per_year())
}
