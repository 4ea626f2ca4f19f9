//! Hour-balance calculations: aggregation, status classification,
//! exhaustion forecasting and low-balance alerts.

mod forecast;
mod remaining;
mod status;

pub use forecast::{consumption_rate, predict_expiry_date, Confidence, ConsumptionRate, ExpiryPrediction};
pub use remaining::{calculate_remaining_hours, PackageBreakdown, RemainingHoursCalculation};
pub use status::{
    classify, get_balance_status, status_bands, BalanceLevel, BalanceStatusLevel, LevelPresentation,
    RecommendedAction, Urgency,
};

use crate::config::BalanceConfig;
use crate::types::{ConsumptionRecord, PackageInfo};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Notification payload for a balance that needs a top-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowBalanceAlert {
    pub level: BalanceLevel,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_hours: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    pub message: String,
    pub recommended_action: RecommendedAction,
}

/// Balance calculations with cached config.
#[derive(Debug, Clone, Default)]
pub struct BalanceService {
    config: BalanceConfig,
}

impl BalanceService {
    pub fn new(config: BalanceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn calculate_remaining_hours(&self, packages: &[PackageInfo]) -> RemainingHoursCalculation {
        calculate_remaining_hours(packages)
    }

    pub fn get_balance_status(&self, remaining_hours: Decimal, total_hours: Decimal) -> BalanceStatusLevel {
        get_balance_status(remaining_hours, total_hours, &self.config.status_thresholds)
    }

    /// Status of an aggregated balance.
    pub fn status_of(&self, balance: &RemainingHoursCalculation) -> BalanceStatusLevel {
        self.get_balance_status(balance.total_remaining_hours, balance.total_purchased_hours)
    }

    pub fn consumption_rate(&self, history: &[ConsumptionRecord], now: DateTime<Utc>) -> ConsumptionRate {
        consumption_rate(history, now, &self.config)
    }

    pub fn predict_expiry_date(
        &self,
        balance: &RemainingHoursCalculation,
        history: &[ConsumptionRecord],
        now: DateTime<Utc>,
    ) -> ExpiryPrediction {
        predict_expiry_date(balance, history, now, &self.config)
    }

    /// Forecast against the system clock.
    pub fn predict_expiry_date_now(
        &self,
        balance: &RemainingHoursCalculation,
        history: &[ConsumptionRecord],
    ) -> ExpiryPrediction {
        self.predict_expiry_date(balance, history, Utc::now())
    }

    /// Alert for critical or low balances.
    ///
    /// Students who never purchased anything get no alert.
    pub fn low_balance_alert(&self, balance: &RemainingHoursCalculation) -> Option<LowBalanceAlert> {
        if balance.total_purchased_hours <= Decimal::ZERO {
            return None;
        }

        let status = self.status_of(balance);
        if !status.level.needs_attention() {
            return None;
        }

        info!(
            level = %status.level,
            remaining_hours = %balance.total_remaining_hours,
            "Low balance alert triggered"
        );

        Some(LowBalanceAlert {
            level: status.level,
            remaining_hours: balance.total_remaining_hours,
            percentage: status.percentage,
            message: status.message,
            recommended_action: status.recommended_action,
        })
    }

    /// `"1 hour"`, `"2.5 hours"`.
    pub fn format_hours(hours: Decimal) -> String {
        let hours = hours.normalize();
        if hours == Decimal::ONE {
            "1 hour".to_string()
        } else {
            format!("{} hours", hours)
        }
    }
}
