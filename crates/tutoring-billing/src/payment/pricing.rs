//! Package price calculation.

use crate::error::{BillingError, BillingResult};
use crate::money::{parse_amount, round_cents};
use crate::types::TopUpPackage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Price breakdown for a top-up package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCalculationResult {
    /// Amount actually charged.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    /// Undiscounted unit rate.
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_hour: Decimal,
    /// `hours * price_per_hour`.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_price: Decimal,
    /// `original_price - total_price`, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_amount: Decimal,
    /// Stated discount percentage (0 when absent).
    pub discount_percentage: u8,
    /// Whether the package advertises a discount.
    pub has_discount: bool,
}

/// Calculate the price breakdown of a package.
///
/// Formula:
/// - original = hours * price_per_hour
/// - discount = max(original - price_eur, 0)
///
/// `has_discount` reflects the package's stated `discount_percentage`, not the
/// computed difference: a catalog entry priced below its hourly rate without
/// a stated discount reports a non-zero `discount_amount` and
/// `has_discount == false`.
pub fn calculate_package_price(pkg: &TopUpPackage) -> BillingResult<PaymentCalculationResult> {
    let price_per_hour = parse_amount("price_per_hour", &pkg.price_per_hour)?;
    let total_price = parse_amount("price_eur", &pkg.price_eur)?;

    if pkg.hours < Decimal::ZERO {
        return Err(BillingError::validation("Package hours must not be negative"));
    }
    if price_per_hour < Decimal::ZERO || total_price < Decimal::ZERO {
        return Err(BillingError::validation("Package prices must not be negative"));
    }

    let discount_percentage = pkg.discount_percentage.unwrap_or(0);
    if discount_percentage > 100 {
        return Err(BillingError::validation(
            "Discount percentage must be between 0 and 100",
        ));
    }

    let original_price = pkg
        .hours
        .checked_mul(price_per_hour)
        .map(round_cents)
        .ok_or_else(|| BillingError::InvalidAmount {
            field: "hours",
            value: pkg.hours.to_string(),
        })?;
    let discount_amount = (original_price - total_price).max(Decimal::ZERO);

    debug!(
        package_id = pkg.id,
        %original_price,
        %total_price,
        %discount_amount,
        "Calculated package price"
    );

    Ok(PaymentCalculationResult {
        total_price: round_cents(total_price),
        price_per_hour: round_cents(price_per_hour),
        original_price,
        discount_amount: round_cents(discount_amount),
        discount_percentage,
        has_discount: discount_percentage > 0,
    })
}

/// Post-discount price per hour, zero for a zero-hour package.
pub fn effective_hourly_rate(pkg: &TopUpPackage) -> BillingResult<Decimal> {
    let total_price = parse_amount("price_eur", &pkg.price_eur)?;
    if pkg.hours <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    Ok(total_price
        .checked_div(pkg.hours)
        .map(round_cents)
        .unwrap_or(Decimal::ZERO))
}

/// Format an amount as `€180.00` (or `-€5.00`).
pub fn format_price(symbol: &str, amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}
