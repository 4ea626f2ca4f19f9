//! Common test fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use tutoring_billing::{CardDetails, PaymentMethod, TopUpPackage};

/// Pinned clock used across scenarios.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
}

/// Catalog package parsed from the JSON the catalog API returns.
pub fn catalog_package(json: serde_json::Value) -> TopUpPackage {
    serde_json::from_value(json).unwrap()
}

pub fn saved_card(id: &str, exp_month: u32, exp_year: i32, funding: &str) -> PaymentMethod {
    PaymentMethod {
        id: id.into(),
        card: Some(CardDetails {
            brand: "visa".into(),
            last4: "4242".into(),
            exp_month,
            exp_year,
            funding: funding.into(),
        }),
        is_default: false,
    }
}
