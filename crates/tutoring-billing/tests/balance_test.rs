//! Integration tests for balance aggregation and forecasting.

mod common;

use chrono::{Duration, TimeZone, Utc};
use common::fixed_now;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;
use tutoring_billing::balance::RecommendedAction;
use tutoring_billing::{BalanceLevel, BalanceService, Confidence, ConsumptionRecord, PackageInfo};

fn student_packages() -> Vec<PackageInfo> {
    serde_json::from_value(json!([
        { "transactionId": "tx_100", "planName": "10 hours", "purchasedHours": 10, "consumedHours": 3 },
        { "transactionId": "tx_101", "planName": "5 hours", "purchasedHours": 5, "consumedHours": 5 }
    ]))
    .unwrap()
}

#[test]
fn test_aggregation_scenario() {
    let service = BalanceService::default();

    let calc = service.calculate_remaining_hours(&student_packages());

    assert_eq!(
        serde_json::to_value(&calc).unwrap(),
        json!({
            "totalRemainingHours": 7.0,
            "totalPurchasedHours": 15.0,
            "totalConsumedHours": 8.0,
            "packageBreakdown": [
                { "transactionId": "tx_100", "planName": "10 hours", "remainingHours": 7.0, "percentageRemaining": 70.0 },
                { "transactionId": "tx_101", "planName": "5 hours", "remainingHours": 0.0, "percentageRemaining": 0.0 }
            ]
        })
    );
}

#[test]
fn test_empty_student() {
    let service = BalanceService::default();

    let calc = service.calculate_remaining_hours(&[]);

    assert!(calc.total_remaining_hours.is_zero());
    assert!(calc.package_breakdown.is_empty());
    assert!(service.low_balance_alert(&calc).is_none());
    let prediction = service.predict_expiry_date(&calc, &[], fixed_now());
    assert_eq!(prediction.days_until_expiry, None);
    assert_eq!(prediction.confidence, Confidence::Low);
}

#[test]
fn test_status_and_alert_follow_aggregate() {
    let service = BalanceService::default();
    let calc = service.calculate_remaining_hours(&[PackageInfo::new(
        "tx_1",
        "20 hours",
        dec!(20),
        dec!(16),
    )]);

    let status = service.status_of(&calc);
    assert_eq!(status.level, BalanceLevel::Low);
    assert_eq!(status.recommended_action, RecommendedAction::PlanPurchase);

    let alert = service.low_balance_alert(&calc).unwrap();
    assert_eq!(alert.remaining_hours, dec!(4));
    assert_eq!(alert.percentage, dec!(20));
}

#[test]
fn test_forecast_from_twice_weekly_lessons() {
    let service = BalanceService::default();
    let now = fixed_now();
    let calc = service.calculate_remaining_hours(&[PackageInfo::new(
        "tx_1",
        "40 hours",
        dec!(40),
        dec!(10),
    )]);

    // One-hour lessons every 3-4 days for the last five weeks.
    let history: Vec<ConsumptionRecord> = (0..10)
        .map(|i| ConsumptionRecord::new(now - Duration::days(35) + Duration::days(i * 7 / 2), Decimal::ONE))
        .collect();

    let prediction = service.predict_expiry_date(&calc, &history, now);

    assert_eq!(prediction.confidence, Confidence::High);
    let days = prediction.days_until_expiry.unwrap();
    assert!(days > 60 && days < 160, "unexpected projection: {days} days");
    assert_eq!(
        prediction.estimated_expiry_date,
        Some(now + Duration::days(days))
    );
}

#[test]
fn test_forecast_serializes_nulls_when_unknown() {
    let service = BalanceService::default();
    let calc = service.calculate_remaining_hours(&student_packages());
    let stale = vec![ConsumptionRecord::new(
        Utc.with_ymd_and_hms(2025, 1, 10, 10, 0, 0).unwrap(),
        dec!(2),
    )];

    let value = serde_json::to_value(service.predict_expiry_date(&calc, &stale, fixed_now())).unwrap();

    assert_eq!(value["daysUntilExpiry"], json!(null));
    assert_eq!(value["estimatedExpiryDate"], json!(null));
    assert_eq!(value["confidence"], "low");
    assert!(value["reasoning"].as_str().unwrap().contains("28 days"));
}
