//! Balance command - remaining hours, status and alert.

use crate::commands::Context;
use crate::error::CliResult;
use crate::input::read_json;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use tutoring_billing::{BalanceService, BalanceStatusLevel, LowBalanceAlert, PackageInfo, RemainingHoursCalculation};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceReport {
    pub balance: RemainingHoursCalculation,
    pub status: BalanceStatusLevel,
    pub remaining_label: String,
    pub alert: Option<LowBalanceAlert>,
}

pub fn execute(ctx: &Context, path: &Path) -> CliResult<serde_json::Value> {
    let packages: Vec<PackageInfo> = read_json(path, "packages")?;
    Ok(serde_json::to_value(report(ctx, &packages))?)
}

pub fn report(ctx: &Context, packages: &[PackageInfo]) -> BalanceReport {
    let balance = ctx.balance.calculate_remaining_hours(packages);
    let status = ctx.balance.status_of(&balance);
    let alert = ctx.balance.low_balance_alert(&balance);

    info!(
        "Balance: {} of {} hours remaining across {} packages ({})",
        balance.total_remaining_hours,
        balance.total_purchased_hours,
        packages.len(),
        status.level
    );

    BalanceReport {
        remaining_label: BalanceService::format_hours(balance.total_remaining_hours),
        balance,
        status,
        alert,
    }
}
