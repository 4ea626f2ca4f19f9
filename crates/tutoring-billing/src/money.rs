//! Decimal helpers shared by the payment and balance calculations.

use crate::error::{BillingError, BillingResult};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places kept for money and percentages.
pub const CENTS_SCALE: u32 = 2;

/// Parse a decimal amount string such as `"180.00"`.
///
/// Surrounding whitespace is ignored; an empty string is rejected.
pub fn parse_amount(field: &'static str, value: &str) -> BillingResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| BillingError::InvalidAmount {
        field,
        value: value.to_string(),
    })
}

/// Round to cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENTS_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Unrounded `part / whole * 100`, or zero when `whole` is not positive.
///
/// Saturates at `Decimal::MAX`/`Decimal::MIN` when the ratio is too large to represent.
pub fn exact_percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    match part.checked_div(whole) {
        Some(ratio) => ratio.saturating_mul(Decimal::ONE_HUNDRED),
        None if part.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// [`exact_percentage_of`] rounded to cents, for display.
pub fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    round_cents(exact_percentage_of(part, whole))
}
