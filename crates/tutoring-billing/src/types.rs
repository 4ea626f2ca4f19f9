//! Core input types for pricing and balance calculations.
//!
//! These are plain values sourced from the catalog, the payment provider and
//! the lesson ledger. Nothing in this crate mutates them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable bundle of tutoring hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopUpPackage {
    pub id: u64,
    /// Hours granted by the package.
    pub hours: Decimal,
    /// Total price actually charged, after any discount (decimal string).
    pub price_eur: String,
    /// Undiscounted unit rate (decimal string).
    pub price_per_hour: String,
    /// Stated discount, 0-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<u8>,
    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub display_order: i32,
}

/// Card details of a saved payment method.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub last4: String,
    /// 1-12, zero when unknown.
    #[serde(default)]
    pub exp_month: u32,
    /// Four-digit year, zero when unknown.
    #[serde(default)]
    pub exp_year: i32,
    /// "credit", "debit", "prepaid" or "unknown".
    #[serde(default)]
    pub funding: String,
}

impl CardDetails {
    /// Brand, last four digits and a usable expiry are all present.
    pub fn is_complete(&self) -> bool {
        !self.brand.trim().is_empty()
            && !self.last4.trim().is_empty()
            && (1..=12).contains(&self.exp_month)
            && self.exp_year != 0
    }
}

/// A tokenized, previously saved payment instrument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Provider token, e.g. `pm_1Nx...`.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub card: Option<CardDetails>,
    #[serde(default)]
    pub is_default: bool,
}

/// How a quick top-up chooses its payment method.
///
/// Replaces the legacy "null means default" convention with an explicit
/// third state so the "must specify" rejection is reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodSelection {
    /// Charge this saved method.
    Explicit(String),
    /// Charge the account's default method.
    UseDefault,
    /// Caller gave no usable signal.
    Unspecified,
}

impl From<Option<String>> for PaymentMethodSelection {
    /// Legacy mapping: `None` selects the default method, a blank id selects nothing.
    fn from(id: Option<String>) -> Self {
        match id {
            None => PaymentMethodSelection::UseDefault,
            Some(id) if id.trim().is_empty() => PaymentMethodSelection::Unspecified,
            Some(id) => PaymentMethodSelection::Explicit(id),
        }
    }
}

impl From<Option<&str>> for PaymentMethodSelection {
    fn from(id: Option<&str>) -> Self {
        id.map(str::to_owned).into()
    }
}

/// An active, possibly partially consumed, purchased package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub transaction_id: String,
    pub plan_name: String,
    pub purchased_hours: Decimal,
    pub consumed_hours: Decimal,
}

impl PackageInfo {
    pub fn new(
        transaction_id: impl Into<String>,
        plan_name: impl Into<String>,
        purchased_hours: Decimal,
        consumed_hours: Decimal,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            plan_name: plan_name.into(),
            purchased_hours,
            consumed_hours,
        }
    }

    /// Purchased minus consumed. Not clamped at zero: over-consumption shows
    /// as negative. Saturates at the `Decimal` range.
    pub fn remaining_hours(&self) -> Decimal {
        self.purchased_hours.saturating_sub(self.consumed_hours)
    }
}

/// A single historical usage observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumptionRecord {
    pub date: DateTime<Utc>,
    pub hours_consumed: Decimal,
}

impl ConsumptionRecord {
    pub fn new(date: DateTime<Utc>, hours_consumed: Decimal) -> Self {
        Self {
            date,
            hours_consumed,
        }
    }
}
