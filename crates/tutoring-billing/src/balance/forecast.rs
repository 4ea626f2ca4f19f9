//! Hour-balance exhaustion forecasting.
//!
//! Consumption is averaged over a trailing window ending at `now`. The
//! averaging span starts at the first in-window record (inclusive of its
//! day), or covers the whole window when older history exists, and is never
//! shorter than the configured minimum observation span.

use crate::balance::RemainingHoursCalculation;
use crate::config::BalanceConfig;
use crate::money::round_cents;
use crate::types::ConsumptionRecord;
use chrono::{DateTime, Datelike, TimeDelta, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Consumption statistics over the forecast window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRate {
    /// Unrounded hours per day.
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_rate: Decimal,
    /// Records inside the window with positive consumption.
    pub records_used: usize,
    /// Distinct ISO weeks those records fall in.
    pub weeks_covered: usize,
    /// Days the rate was averaged over, zero when no records were used.
    pub observed_days: i64,
}

impl ConsumptionRate {
    fn empty() -> Self {
        Self {
            daily_rate: Decimal::ZERO,
            weekly_rate: Decimal::ZERO,
            monthly_rate: Decimal::ZERO,
            records_used: 0,
            weeks_covered: 0,
            observed_days: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.daily_rate <= Decimal::ZERO
    }

    pub fn confidence(&self, config: &BalanceConfig) -> Confidence {
        if self.records_used >= config.high_confidence_records
            && self.weeks_covered >= config.high_confidence_weeks as usize
        {
            Confidence::High
        } else if self.records_used >= 2 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

/// Projected date the remaining hours run out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryPrediction {
    pub days_until_expiry: Option<i64>,
    pub estimated_expiry_date: Option<DateTime<Utc>>,
    pub confidence: Confidence,
    pub reasoning: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_rate: Decimal,
}

/// Average consumption over the trailing window.
///
/// Future-dated records and records with non-positive hours are ignored.
/// The window total and the weekly/monthly projections saturate at the
/// `Decimal` range instead of overflowing.
pub fn consumption_rate(
    history: &[ConsumptionRecord],
    now: DateTime<Utc>,
    config: &BalanceConfig,
) -> ConsumptionRate {
    let window_days = config.forecast_window_days();
    let Some(window_start) = TimeDelta::try_days(window_days).and_then(|d| now.checked_sub_signed(d))
    else {
        return ConsumptionRate::empty();
    };

    let in_window: Vec<&ConsumptionRecord> = history
        .iter()
        .filter(|r| r.date > window_start && r.date <= now && r.hours_consumed > Decimal::ZERO)
        .collect();

    let Some(earliest) = in_window.iter().map(|r| r.date).min() else {
        return ConsumptionRate::empty();
    };

    let has_older_history = history.iter().any(|r| r.date <= window_start);
    let observed_days = if has_older_history {
        window_days
    } else {
        ((now - earliest).num_days() + 1).clamp(config.min_observation_days(), window_days)
    };

    let total = in_window
        .iter()
        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.hours_consumed));
    let daily_rate = total / Decimal::from(observed_days);

    let weeks_covered = in_window
        .iter()
        .map(|r| {
            let week = r.date.iso_week();
            (week.year(), week.week())
        })
        .collect::<BTreeSet<_>>()
        .len();

    ConsumptionRate {
        daily_rate,
        weekly_rate: round_cents(daily_rate.saturating_mul(Decimal::from(7))),
        monthly_rate: round_cents(daily_rate.saturating_mul(Decimal::from(30))),
        records_used: in_window.len(),
        weeks_covered,
        observed_days,
    }
}

/// Predict when the remaining hours of `balance` run out.
///
/// Without usable history the projection fields are `None` and confidence is
/// low; this is not an error.
pub fn predict_expiry_date(
    balance: &RemainingHoursCalculation,
    history: &[ConsumptionRecord],
    now: DateTime<Utc>,
    config: &BalanceConfig,
) -> ExpiryPrediction {
    let rate = consumption_rate(history, now, config);
    let remaining = balance.total_remaining_hours;

    if rate.is_zero() {
        return ExpiryPrediction {
            days_until_expiry: None,
            estimated_expiry_date: None,
            confidence: Confidence::Low,
            reasoning: format!(
                "Not enough consumption in the last {} days to project when hours run out",
                config.forecast_window_days()
            ),
            daily_rate: Decimal::ZERO,
            weekly_rate: Decimal::ZERO,
            monthly_rate: Decimal::ZERO,
        };
    }

    let confidence = rate.confidence(config);

    let (days_until_expiry, estimated_expiry_date, reasoning) = if remaining <= Decimal::ZERO {
        (Some(0), Some(now), "No hours remaining".to_string())
    } else {
        let days = remaining
            .checked_div(rate.daily_rate)
            .and_then(|d| d.floor().to_i64());
        let date = days
            .and_then(TimeDelta::try_days)
            .and_then(|d| now.checked_add_signed(d));
        let reasoning = format!(
            "{} hours remaining at about {} hours per week (averaged over {} days, {} sessions)",
            remaining.normalize(),
            rate.weekly_rate.normalize(),
            rate.observed_days,
            rate.records_used
        );
        // A projection too far out to represent is reported as unknown.
        match date {
            Some(date) => (days, Some(date), reasoning),
            None => (None, None, reasoning),
        }
    };

    debug!(
        %remaining,
        daily_rate = %rate.daily_rate,
        ?days_until_expiry,
        ?confidence,
        "Predicted balance expiry"
    );

    ExpiryPrediction {
        days_until_expiry,
        estimated_expiry_date,
        confidence,
        reasoning,
        daily_rate: round_cents(rate.daily_rate),
        weekly_rate: rate.weekly_rate,
        monthly_rate: rate.monthly_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::calculate_remaining_hours;
    use crate::types::PackageInfo;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, month, day, 10, 0, 0).unwrap()
    }

    fn balance(remaining: Decimal) -> RemainingHoursCalculation {
        calculate_remaining_hours(&[PackageInfo::new("tx_1", "Plus", dec!(20), dec!(20) - remaining)])
    }

    fn weekly_history() -> Vec<ConsumptionRecord> {
        vec![
            ConsumptionRecord::new(at(9, 28), dec!(2)),
            ConsumptionRecord::new(at(10, 5), dec!(2)),
            ConsumptionRecord::new(at(10, 12), dec!(2)),
            ConsumptionRecord::new(at(10, 19), dec!(2)),
        ]
    }

    #[test]
    fn test_empty_history() {
        let prediction = predict_expiry_date(&balance(dec!(7)), &[], now(), &BalanceConfig::default());

        assert_eq!(prediction.days_until_expiry, None);
        assert_eq!(prediction.estimated_expiry_date, None);
        assert_eq!(prediction.confidence, Confidence::Low);
        assert!(prediction.reasoning.contains("Not enough consumption"));
    }

    #[test]
    fn test_zero_consumption_history() {
        let history = vec![
            ConsumptionRecord::new(at(10, 1), Decimal::ZERO),
            ConsumptionRecord::new(at(10, 8), Decimal::ZERO),
        ];

        let prediction = predict_expiry_date(&balance(dec!(7)), &history, now(), &BalanceConfig::default());

        assert_eq!(prediction.days_until_expiry, None);
        assert_eq!(prediction.confidence, Confidence::Low);
    }

    #[test]
    fn test_regular_weekly_usage() {
        let config = BalanceConfig::default();
        let rate = consumption_rate(&weekly_history(), now(), &config);

        // First record 21 days before now, counted inclusively.
        assert_eq!(rate.observed_days, 22);
        assert_eq!(rate.records_used, 4);
        assert_eq!(rate.weeks_covered, 4);
        assert_eq!(rate.weekly_rate, dec!(2.55));
        assert_eq!(rate.monthly_rate, dec!(10.91));

        let prediction = predict_expiry_date(&balance(dec!(7)), &weekly_history(), now(), &config);

        // 7 / (8 / 22) = 19.25
        assert_eq!(prediction.days_until_expiry, Some(19));
        assert_eq!(
            prediction.estimated_expiry_date,
            Some(Utc.with_ymd_and_hms(2026, 11, 7, 12, 0, 0).unwrap())
        );
        assert_eq!(prediction.confidence, Confidence::High);
    }

    #[test]
    fn test_older_history_spans_full_window() {
        let mut history = vec![ConsumptionRecord::new(at(8, 3), dec!(5))];
        history.extend(weekly_history());

        let rate = consumption_rate(&history, now(), &BalanceConfig::default());

        assert_eq!(rate.observed_days, 28);
        assert_eq!(rate.records_used, 4);
        // 8 / 28 * 7
        assert_eq!(rate.weekly_rate, dec!(2));
    }

    #[test]
    fn test_single_recent_record_uses_minimum_span() {
        let history = vec![ConsumptionRecord::new(at(10, 18), dec!(2))];

        let prediction = predict_expiry_date(&balance(dec!(10)), &history, now(), &BalanceConfig::default());

        // 10 / (2 / 7) = 35
        assert_eq!(prediction.days_until_expiry, Some(35));
        assert_eq!(
            prediction.estimated_expiry_date,
            Some(Utc.with_ymd_and_hms(2026, 11, 23, 12, 0, 0).unwrap())
        );
        assert_eq!(prediction.confidence, Confidence::Low);
    }

    #[test]
    fn test_partial_history_is_medium_confidence() {
        let history = vec![
            ConsumptionRecord::new(at(10, 12), dec!(1)),
            ConsumptionRecord::new(at(10, 14), dec!(1)),
        ];

        let prediction = predict_expiry_date(&balance(dec!(10)), &history, now(), &BalanceConfig::default());

        assert_eq!(prediction.confidence, Confidence::Medium);
        assert!(prediction.days_until_expiry.is_some());
    }

    #[test]
    fn test_future_and_stale_records_ignored() {
        let history = vec![
            ConsumptionRecord::new(at(12, 1), dec!(4)),
            ConsumptionRecord::new(Utc.with_ymd_and_hms(2026, 9, 21, 12, 0, 0).unwrap(), dec!(4)),
        ];

        let rate = consumption_rate(&history, now(), &BalanceConfig::default());

        assert!(rate.is_zero());
        assert_eq!(rate.records_used, 0);
    }

    #[test]
    fn test_exhausted_balance() {
        let prediction = predict_expiry_date(
            &balance(Decimal::ZERO),
            &weekly_history(),
            now(),
            &BalanceConfig::default(),
        );

        assert_eq!(prediction.days_until_expiry, Some(0));
        assert_eq!(prediction.estimated_expiry_date, Some(now()));
        assert_eq!(prediction.reasoning, "No hours remaining");
    }

    #[test]
    fn test_huge_consumption_saturates() {
        let history = vec![
            ConsumptionRecord::new(at(10, 18), Decimal::MAX),
            ConsumptionRecord::new(at(10, 19), Decimal::MAX),
        ];

        let rate = consumption_rate(&history, now(), &BalanceConfig::default());

        assert_eq!(rate.records_used, 2);
        assert_eq!(rate.observed_days, 7);
        assert!(rate.daily_rate > Decimal::ZERO);
        assert_eq!(rate.monthly_rate, Decimal::MAX);

        let prediction = predict_expiry_date(&balance(dec!(7)), &history, now(), &BalanceConfig::default());
        assert_eq!(prediction.days_until_expiry, Some(0));
    }

    #[test]
    fn test_unordered_history_accepted() {
        let mut history = weekly_history();
        history.reverse();

        let prediction = predict_expiry_date(&balance(dec!(7)), &history, now(), &BalanceConfig::default());

        assert_eq!(prediction.days_until_expiry, Some(19));
    }
}
