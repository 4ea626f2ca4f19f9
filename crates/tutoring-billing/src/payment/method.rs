//! Saved payment method checks.

use crate::types::PaymentMethod;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ERR_INVALID_ID: &str = "Invalid payment method ID";
pub const ERR_INCOMPLETE_CARD: &str = "Incomplete card details";
pub const ERR_EXPIRED: &str = "Payment method has expired";
pub const WARN_EXPIRES_SOON: &str = "Payment method expires soon";
pub const WARN_PREPAID: &str = "Prepaid card may have restrictions";

/// Outcome of checking a saved payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodValidationResult {
    pub is_valid: bool,
    /// Any error blocks processing; warnings never do.
    pub can_process: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check a payment method against `now`.
///
/// Rules are independent and their results are merged. A card stays usable
/// through the last day of its expiry month.
pub fn validate_payment_method(
    method: &PaymentMethod,
    now: DateTime<Utc>,
    prepaid_funding: &str,
) -> PaymentMethodValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if method.id.trim().is_empty() {
        errors.push(ERR_INVALID_ID.to_string());
    }

    match &method.card {
        Some(card) => {
            if !card.is_complete() {
                errors.push(ERR_INCOMPLETE_CARD.to_string());
            }

            if (1..=12).contains(&card.exp_month) && card.exp_year != 0 {
                let expiry = (card.exp_year, card.exp_month);
                let current = (now.year(), now.month());
                if expiry < current {
                    errors.push(ERR_EXPIRED.to_string());
                } else if expiry == current {
                    warnings.push(WARN_EXPIRES_SOON.to_string());
                }
            }

            if card.funding.eq_ignore_ascii_case(prepaid_funding) {
                warnings.push(WARN_PREPAID.to_string());
            }
        }
        None => errors.push(ERR_INCOMPLETE_CARD.to_string()),
    }

    let is_valid = errors.is_empty();
    debug!(
        method_id = %method.id,
        is_valid,
        errors = errors.len(),
        warnings = warnings.len(),
        "Validated payment method"
    );

    PaymentMethodValidationResult {
        is_valid,
        can_process: is_valid,
        errors,
        warnings,
    }
}

/// Human-readable label, e.g. `Visa •••• 4242`.
pub fn display_name(method: &PaymentMethod) -> String {
    match &method.card {
        Some(card) if !card.brand.trim().is_empty() && !card.last4.trim().is_empty() => {
            format!("{} •••• {}", capitalize(card.brand.trim()), card.last4.trim())
        }
        _ => "Saved payment method".to_string(),
    }
}

/// Default method if it can be charged, otherwise the first chargeable one.
pub fn select_payment_method<'a>(
    methods: &'a [PaymentMethod],
    now: DateTime<Utc>,
    prepaid_funding: &str,
) -> Option<&'a PaymentMethod> {
    let usable = |m: &&PaymentMethod| validate_payment_method(m, now, prepaid_funding).can_process;

    methods
        .iter()
        .filter(|m| m.is_default)
        .find(usable)
        .or_else(|| methods.iter().find(usable))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
