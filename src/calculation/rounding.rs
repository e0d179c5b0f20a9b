//! Rupee rounding and percentage helpers.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to whole rupees, halves away from zero.
///
/// This is the only rounding rule in the engine. It is applied to displayed
/// line items; sums are taken over exact values and rounded once.
///
/// # Examples
///
/// ```
/// use statutory_payroll::calculation::round_rupees;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_rupees(Decimal::new(1575, 1)), Decimal::from(158));
/// assert_eq!(round_rupees(Decimal::new(15749, 2)), Decimal::from(157));
/// ```
pub fn round_rupees(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns `percentage`% of `amount`, unrounded.
pub(crate) fn percent_of(amount: Decimal, percentage: Decimal) -> Decimal {
    amount * percentage / Decimal::ONE_HUNDRED
}
