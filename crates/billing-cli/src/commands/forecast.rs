//! Forecast command - predicted exhaustion date.

use crate::commands::Context;
use crate::error::CliResult;
use crate::input::read_json;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tutoring_billing::balance::ConsumptionRate;
use tutoring_billing::{ConsumptionRecord, ExpiryPrediction, PackageInfo, RemainingHoursCalculation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub balance: RemainingHoursCalculation,
    pub usage: ConsumptionRate,
    pub prediction: ExpiryPrediction,
}

pub fn execute(ctx: &Context, packages: &Path, history: &Path) -> CliResult<serde_json::Value> {
    let packages: Vec<PackageInfo> = read_json(packages, "packages")?;
    let history: Vec<ConsumptionRecord> = read_json(history, "consumption history")?;
    Ok(serde_json::to_value(report(ctx, &packages, &history))?)
}

pub fn report(ctx: &Context, packages: &[PackageInfo], history: &[ConsumptionRecord]) -> ForecastReport {
    let balance = ctx.balance.calculate_remaining_hours(packages);
    let usage = ctx.balance.consumption_rate(history, ctx.now);
    let prediction = ctx.balance.predict_expiry_date(&balance, history, ctx.now);

    match prediction.estimated_expiry_date {
        Some(date) => info!("Hours projected to run out on {}", date.date_naive()),
        None => info!("No projection: {}", prediction.reasoning),
    }

    ForecastReport {
        balance,
        usage,
        prediction,
    }
}
