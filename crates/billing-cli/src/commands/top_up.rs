//! Quick-top-up command - build a purchase request.

use crate::commands::Context;
use crate::error::CliResult;
use tutoring_billing::PaymentMethodSelection;

/// Map command-line flags to a selection. No flag at all is `Unspecified`.
pub fn selection(payment_method: Option<&str>, use_default: bool) -> PaymentMethodSelection {
    match (payment_method, use_default) {
        (Some(id), _) if !id.trim().is_empty() => PaymentMethodSelection::Explicit(id.to_string()),
        (_, true) => PaymentMethodSelection::UseDefault,
        _ => PaymentMethodSelection::Unspecified,
    }
}

pub fn execute(
    ctx: &Context,
    package_id: u64,
    selection: PaymentMethodSelection,
    email: Option<&str>,
) -> CliResult<serde_json::Value> {
    let request = ctx.payment.process_quick_top_up(package_id, selection, email)?;
    Ok(serde_json::to_value(request)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::CliError;
    use tutoring_billing::BillingError;

    #[test]
    fn test_selection_from_flags() {
        assert_eq!(
            selection(Some("pm_1"), false),
            PaymentMethodSelection::Explicit("pm_1".into())
        );
        assert_eq!(selection(None, true), PaymentMethodSelection::UseDefault);
        assert_eq!(selection(Some(" "), true), PaymentMethodSelection::UseDefault);
        assert_eq!(selection(None, false), PaymentMethodSelection::Unspecified);
    }

    #[test]
    fn test_execute_default() {
        let json = execute(&context(), 1, PaymentMethodSelection::UseDefault, Some("student@example.com"))
            .unwrap();

        assert_eq!(json["package_id"], 1);
        assert_eq!(json["use_default_payment_method"], true);
        assert!(json.get("payment_method_id").is_none());
    }

    #[test]
    fn test_execute_without_selection_fails() {
        let err = execute(&context(), 1, PaymentMethodSelection::Unspecified, None).unwrap_err();

        assert!(matches!(err, CliError::Billing(BillingError::Validation(_))));
        assert_eq!(
            err.to_string(),
            "Either payment method ID or use default payment method must be specified"
        );
    }
}
