//! Billing configuration.

use crate::error::{BillingError, BillingResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix, e.g. `BILLING_BALANCE__FORECAST_WINDOW=28days`.
pub const ENV_PREFIX: &str = "BILLING";

/// Top-level billing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// Payment/pricing configuration.
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Balance and forecasting configuration.
    #[serde(default)]
    pub balance: BalanceConfig,

    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines.
    #[serde(default)]
    pub log_json: bool,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            payment: PaymentConfig::default(),
            balance: BalanceConfig::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl BillingConfig {
    /// Load configuration from `BILLING_*` environment variables.
    pub fn load() -> BillingResult<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Build configuration from an explicit environment source.
    pub fn from_environment(env: config::Environment) -> BillingResult<Self> {
        let config = config::Config::builder()
            .add_source(env.prefix_separator("_").separator("__").try_parsing(false))
            .build()?;

        let config: BillingConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints serde cannot express.
    pub fn validate(&self) -> BillingResult<()> {
        self.balance.validate()
    }
}

/// Payment configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Symbol prefixed to formatted prices.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Card funding type that triggers the restrictions warning.
    #[serde(default = "default_prepaid_funding")]
    pub prepaid_funding: String,
}

fn default_currency_symbol() -> String {
    "€".into()
}

fn default_prepaid_funding() -> String {
    "prepaid".into()
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            prepaid_funding: default_prepaid_funding(),
        }
    }
}

/// Upper bounds (exclusive, in percent) of the non-healthy balance bands.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusThresholds {
    /// Below this percentage the balance is critical.
    /// Default: 10
    #[serde(default = "default_critical_threshold")]
    pub critical: Decimal,

    /// Below this percentage the balance is low.
    /// Default: 30
    #[serde(default = "default_low_threshold")]
    pub low: Decimal,

    /// Below this percentage the balance is medium; at or above it, healthy.
    /// Default: 70
    #[serde(default = "default_medium_threshold")]
    pub medium: Decimal,
}

fn default_critical_threshold() -> Decimal {
    Decimal::from(10)
}

fn default_low_threshold() -> Decimal {
    Decimal::from(30)
}

fn default_medium_threshold() -> Decimal {
    Decimal::from(70)
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            critical: default_critical_threshold(),
            low: default_low_threshold(),
            medium: default_medium_threshold(),
        }
    }
}

/// Balance classification and forecasting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceConfig {
    /// Status band boundaries.
    #[serde(default)]
    pub status_thresholds: StatusThresholds,

    /// Trailing window of consumption history used for forecasting.
    #[serde(default = "default_forecast_window", with = "humantime_serde")]
    pub forecast_window: Duration,

    /// Shortest span a consumption rate is averaged over, so a single recent
    /// lesson does not project an absurdly high rate.
    #[serde(default = "default_min_observation", with = "humantime_serde")]
    pub min_observation: Duration,

    /// Distinct calendar weeks of usage required for a high-confidence forecast.
    #[serde(default = "default_high_confidence_weeks")]
    pub high_confidence_weeks: u32,

    /// Records required for a high-confidence forecast.
    #[serde(default = "default_high_confidence_records")]
    pub high_confidence_records: usize,
}

fn default_forecast_window() -> Duration {
    Duration::from_secs(28 * 24 * 60 * 60) // 4 weeks
}

fn default_min_observation() -> Duration {
    Duration::from_secs(7 * 24 * 60 * 60) // 1 week
}

fn default_high_confidence_weeks() -> u32 {
    3
}

fn default_high_confidence_records() -> usize {
    4
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            status_thresholds: StatusThresholds::default(),
            forecast_window: default_forecast_window(),
            min_observation: default_min_observation(),
            high_confidence_weeks: default_high_confidence_weeks(),
            high_confidence_records: default_high_confidence_records(),
        }
    }
}

impl BalanceConfig {
    /// Forecast window in whole days (at least one).
    pub fn forecast_window_days(&self) -> i64 {
        whole_days(self.forecast_window).max(1)
    }

    /// Minimum observation span in whole days, never longer than the window.
    pub fn min_observation_days(&self) -> i64 {
        whole_days(self.min_observation).clamp(1, self.forecast_window_days())
    }

    pub fn validate(&self) -> BillingResult<()> {
        let t = &self.status_thresholds;
        if t.critical < Decimal::ZERO || !(t.critical <= t.low && t.low <= t.medium) {
            return Err(BillingError::Config(format!(
                "status thresholds must satisfy 0 <= critical <= low <= medium, got {}/{}/{}",
                t.critical, t.low, t.medium
            )));
        }
        if t.medium > Decimal::ONE_HUNDRED {
            return Err(BillingError::Config(format!(
                "medium threshold must not exceed 100, got {}",
                t.medium
            )));
        }
        if whole_days(self.forecast_window) < 1 {
            return Err(BillingError::Config(
                "forecast window must be at least one day".into(),
            ));
        }
        Ok(())
    }
}

fn whole_days(d: Duration) -> i64 {
    i64::try_from(d.as_secs() / 86_400).unwrap_or(i64::MAX)
}

fn default_log_level() -> String {
    "info".into()
}
