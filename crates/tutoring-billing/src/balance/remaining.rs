//! Remaining-hours aggregation across a student's packages.

use crate::money::percentage_of;
use crate::types::PackageInfo;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-package line of a [`RemainingHoursCalculation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageBreakdown {
    pub transaction_id: String,
    pub plan_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage_remaining: Decimal,
}

/// Hours totals over a set of packages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemainingHoursCalculation {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_remaining_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_purchased_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_consumed_hours: Decimal,
    /// One entry per input package, in input order.
    pub package_breakdown: Vec<PackageBreakdown>,
}

impl RemainingHoursCalculation {
    /// Remaining as a percentage of everything purchased.
    pub fn percentage_remaining(&self) -> Decimal {
        percentage_of(self.total_remaining_hours, self.total_purchased_hours)
    }
}

/// Sum remaining, purchased and consumed hours.
///
/// Exhausted or over-consumed packages are kept in the breakdown; callers
/// decide what to display. Totals saturate at the `Decimal` range instead of
/// overflowing.
pub fn calculate_remaining_hours(packages: &[PackageInfo]) -> RemainingHoursCalculation {
    let mut total_purchased_hours = Decimal::ZERO;
    let mut total_consumed_hours = Decimal::ZERO;

    let package_breakdown = packages
        .iter()
        .map(|pkg| {
            total_purchased_hours = total_purchased_hours.saturating_add(pkg.purchased_hours);
            total_consumed_hours = total_consumed_hours.saturating_add(pkg.consumed_hours);

            let remaining_hours = pkg.remaining_hours();
            PackageBreakdown {
                transaction_id: pkg.transaction_id.clone(),
                plan_name: pkg.plan_name.clone(),
                remaining_hours,
                percentage_remaining: percentage_of(remaining_hours, pkg.purchased_hours),
            }
        })
        .collect();

    RemainingHoursCalculation {
        total_remaining_hours: total_purchased_hours.saturating_sub(total_consumed_hours),
        total_purchased_hours,
        total_consumed_hours,
        package_breakdown,
    }
}
