//! Balance status classification.
//!
//! The balance percentage is matched against an ordered band table built from
//! [`StatusThresholds`]; the first band whose upper bound exceeds the
//! percentage wins, and anything past the last band is healthy. Each level
//! carries a fixed presentation used by the UI and by alerting.

use crate::config::StatusThresholds;
use crate::money::{exact_percentage_of, round_cents};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Qualitative balance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceLevel {
    Critical,
    Low,
    Medium,
    Healthy,
}

impl std::fmt::Display for BalanceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceLevel::Critical => write!(f, "critical"),
            BalanceLevel::Low => write!(f, "low"),
            BalanceLevel::Medium => write!(f, "medium"),
            BalanceLevel::Healthy => write!(f, "healthy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    ImmediatePurchase,
    PlanPurchase,
    Monitor,
    None,
}

/// Fixed presentation of a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelPresentation {
    pub color: &'static str,
    pub bg_color: &'static str,
    pub progress_color: &'static str,
    pub icon: &'static str,
    pub message: &'static str,
    pub urgency: Urgency,
    pub recommended_action: RecommendedAction,
}

impl BalanceLevel {
    pub fn presentation(self) -> LevelPresentation {
        match self {
            BalanceLevel::Critical => LevelPresentation {
                color: "#DC2626",
                bg_color: "#FEF2F2",
                progress_color: "#EF4444",
                icon: "alert-circle",
                message: "Your hours are almost used up. Top up now to keep your lessons scheduled.",
                urgency: Urgency::High,
                recommended_action: RecommendedAction::ImmediatePurchase,
            },
            BalanceLevel::Low => LevelPresentation {
                color: "#D97706",
                bg_color: "#FFFBEB",
                progress_color: "#F59E0B",
                icon: "warning",
                message: "Your balance is running low. Plan your next top-up soon.",
                urgency: Urgency::Medium,
                recommended_action: RecommendedAction::PlanPurchase,
            },
            BalanceLevel::Medium => LevelPresentation {
                color: "#2563EB",
                bg_color: "#EFF6FF",
                progress_color: "#3B82F6",
                icon: "time",
                message: "You have a moderate number of hours left.",
                urgency: Urgency::Low,
                recommended_action: RecommendedAction::Monitor,
            },
            BalanceLevel::Healthy => LevelPresentation {
                color: "#059669",
                bg_color: "#ECFDF5",
                progress_color: "#10B981",
                icon: "checkmark-circle",
                message: "Your balance is healthy.",
                urgency: Urgency::None,
                recommended_action: RecommendedAction::None,
            },
        }
    }

    /// Levels that should prompt a purchase.
    pub fn needs_attention(self) -> bool {
        matches!(self, BalanceLevel::Critical | BalanceLevel::Low)
    }
}

/// Classification of a balance, with everything the UI needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceStatusLevel {
    pub level: BalanceLevel,
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
    pub color: String,
    pub bg_color: String,
    pub progress_color: String,
    pub icon: String,
    pub message: String,
    pub urgency: Urgency,
    pub recommended_action: RecommendedAction,
}

/// Ordered `(upper bound exclusive, level)` bands; above the last is healthy.
pub fn status_bands(thresholds: &StatusThresholds) -> [(Decimal, BalanceLevel); 3] {
    [
        (thresholds.critical, BalanceLevel::Critical),
        (thresholds.low, BalanceLevel::Low),
        (thresholds.medium, BalanceLevel::Medium),
    ]
}

/// Level for a balance percentage.
pub fn classify(percentage: Decimal, thresholds: &StatusThresholds) -> BalanceLevel {
    status_bands(thresholds)
        .into_iter()
        .find(|(upper, _)| percentage < *upper)
        .map(|(_, level)| level)
        .unwrap_or(BalanceLevel::Healthy)
}

/// Classify `remaining` out of `total` hours.
///
/// A zero total classifies as 0%, which is critical with the default bands.
/// Bands are matched on the unrounded percentage; only the reported
/// `percentage` is rounded to cents.
pub fn get_balance_status(
    remaining_hours: Decimal,
    total_hours: Decimal,
    thresholds: &StatusThresholds,
) -> BalanceStatusLevel {
    let exact = exact_percentage_of(remaining_hours, total_hours);
    let level = classify(exact, thresholds);
    let percentage = round_cents(exact);
    let p = level.presentation();

    BalanceStatusLevel {
        level,
        percentage,
        color: p.color.to_string(),
        bg_color: p.bg_color.to_string(),
        progress_color: p.progress_color.to_string(),
        icon: p.icon.to_string(),
        message: p.message.to_string(),
        urgency: p.urgency,
        recommended_action: p.recommended_action,
    }
}
