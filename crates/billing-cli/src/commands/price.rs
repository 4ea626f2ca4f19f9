//! Price command - package price breakdown.

use crate::commands::Context;
use crate::error::CliResult;
use crate::input::read_json;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tutoring_billing::{PaymentCalculationResult, TopUpPackage};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceReport {
    pub package_id: u64,
    #[serde(flatten)]
    pub price: PaymentCalculationResult,
    pub formatted_total: String,
    pub effective_hourly_rate: String,
}

pub fn execute(ctx: &Context, path: &Path) -> CliResult<serde_json::Value> {
    let pkg: TopUpPackage = read_json(path, "package")?;
    Ok(serde_json::to_value(report(ctx, &pkg)?)?)
}

pub fn report(ctx: &Context, pkg: &TopUpPackage) -> CliResult<PriceReport> {
    let price = ctx.payment.calculate_package_price(pkg)?;
    let effective = ctx.payment.effective_hourly_rate(pkg)?;

    info!(
        "Package {}: {} for {} hours",
        pkg.id,
        ctx.payment.format_price(price.total_price),
        pkg.hours
    );

    Ok(PriceReport {
        package_id: pkg.id,
        formatted_total: ctx.payment.format_price(price.total_price),
        effective_hourly_rate: ctx.payment.format_price(effective),
        price,
    })
}
