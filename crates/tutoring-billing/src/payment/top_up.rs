//! Quick top-up request construction.

use crate::error::{BillingError, BillingResult};
use crate::types::PaymentMethodSelection;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const ERR_PACKAGE_REQUIRED: &str = "Package ID is required";
pub const ERR_PAYMENT_METHOD_REQUIRED: &str =
    "Either payment method ID or use default payment method must be specified";

/// Normalized one-step purchase intent, ready for submission.
///
/// Exactly one of `payment_method_id` and `use_default_payment_method` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickTopUpRequest {
    pub package_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method_id: Option<String>,
    pub use_default_payment_method: bool,
    pub confirm_immediately: bool,
}

impl QuickTopUpRequest {
    /// The selection this request encodes.
    pub fn selection(&self) -> PaymentMethodSelection {
        match (&self.payment_method_id, self.use_default_payment_method) {
            (Some(id), false) => PaymentMethodSelection::Explicit(id.clone()),
            (None, true) => PaymentMethodSelection::UseDefault,
            _ => PaymentMethodSelection::Unspecified,
        }
    }
}

/// Validate a quick top-up and build the request.
///
/// `email` identifies the student when an admin purchases on their behalf.
/// It is only logged and never becomes part of the request.
pub fn process_quick_top_up(
    package_id: u64,
    selection: PaymentMethodSelection,
    email: Option<&str>,
) -> BillingResult<QuickTopUpRequest> {
    if package_id == 0 {
        warn!("Quick top-up rejected: missing package id");
        return Err(BillingError::validation(ERR_PACKAGE_REQUIRED));
    }

    let (payment_method_id, use_default_payment_method) = match selection {
        PaymentMethodSelection::Explicit(id) => (Some(id), false),
        PaymentMethodSelection::UseDefault => (None, true),
        PaymentMethodSelection::Unspecified => {
            warn!(package_id, "Quick top-up rejected: no payment method selected");
            return Err(BillingError::validation(ERR_PAYMENT_METHOD_REQUIRED));
        }
    };

    debug!(
        package_id,
        use_default_payment_method,
        on_behalf_of = email.unwrap_or("-"),
        "Built quick top-up request"
    );

    Ok(QuickTopUpRequest {
        package_id,
        payment_method_id,
        use_default_payment_method,
        confirm_immediately: true,
    })
}
