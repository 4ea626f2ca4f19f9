//! Purchase-side calculations: package pricing, payment method checks and
//! quick top-up requests.

mod method;
mod pricing;
mod top_up;

pub use method::{
    display_name, select_payment_method, validate_payment_method, PaymentMethodValidationResult,
    ERR_EXPIRED, ERR_INCOMPLETE_CARD, ERR_INVALID_ID, WARN_EXPIRES_SOON, WARN_PREPAID,
};
pub use pricing::{calculate_package_price, effective_hourly_rate, format_price, PaymentCalculationResult};
pub use top_up::{
    process_quick_top_up, QuickTopUpRequest, ERR_PACKAGE_REQUIRED, ERR_PAYMENT_METHOD_REQUIRED,
};

use crate::config::PaymentConfig;
use crate::error::BillingResult;
use crate::types::{PaymentMethod, PaymentMethodSelection, TopUpPackage};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Payment calculations with cached config.
#[derive(Debug, Clone, Default)]
pub struct PaymentService {
    config: PaymentConfig,
}

impl PaymentService {
    pub fn new(config: PaymentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PaymentConfig {
        &self.config
    }

    /// Validate a quick top-up and build the request.
    pub fn process_quick_top_up(
        &self,
        package_id: u64,
        selection: impl Into<PaymentMethodSelection>,
        email: Option<&str>,
    ) -> BillingResult<QuickTopUpRequest> {
        process_quick_top_up(package_id, selection.into(), email)
    }

    /// Price breakdown of a package.
    pub fn calculate_package_price(&self, pkg: &TopUpPackage) -> BillingResult<PaymentCalculationResult> {
        calculate_package_price(pkg)
    }

    /// Check a payment method as of `now`.
    pub fn validate_payment_method(
        &self,
        method: &PaymentMethod,
        now: DateTime<Utc>,
    ) -> PaymentMethodValidationResult {
        validate_payment_method(method, now, &self.config.prepaid_funding)
    }

    /// Check a payment method against the system clock.
    pub fn validate_payment_method_now(&self, method: &PaymentMethod) -> PaymentMethodValidationResult {
        self.validate_payment_method(method, Utc::now())
    }

    /// Pick the method a quick top-up should charge.
    pub fn select_payment_method<'a>(
        &self,
        methods: &'a [PaymentMethod],
        now: DateTime<Utc>,
    ) -> Option<&'a PaymentMethod> {
        select_payment_method(methods, now, &self.config.prepaid_funding)
    }

    pub fn payment_method_display_name(&self, method: &PaymentMethod) -> String {
        display_name(method)
    }

    pub fn effective_hourly_rate(&self, pkg: &TopUpPackage) -> BillingResult<Decimal> {
        effective_hourly_rate(pkg)
    }

    /// Format an amount with the configured currency symbol.
    pub fn format_price(&self, amount: Decimal) -> String {
        format_price(&self.config.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardDetails;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_service_uses_configured_currency() {
        let service = PaymentService::new(PaymentConfig {
            currency_symbol: "£".into(),
            ..PaymentConfig::default()
        });
        assert_eq!(service.format_price(dec!(12.5)), "£12.50");
    }

    #[test]
    fn test_service_accepts_legacy_option() {
        let service = PaymentService::default();

        let request = service
            .process_quick_top_up(4, Some("pm_abc".to_string()), None)
            .unwrap();
        assert_eq!(request.payment_method_id.as_deref(), Some("pm_abc"));

        let request = service.process_quick_top_up(4, None::<String>, None).unwrap();
        assert!(request.use_default_payment_method);
    }

    #[test]
    fn test_service_prepaid_label_is_configurable() {
        let service = PaymentService::new(PaymentConfig {
            prepaid_funding: "gift".into(),
            ..PaymentConfig::default()
        });
        let method = PaymentMethod {
            id: "pm_1".into(),
            card: Some(CardDetails {
                brand: "mastercard".into(),
                last4: "4444".into(),
                exp_month: 6,
                exp_year: 2030,
                funding: "gift".into(),
            }),
            is_default: true,
        };
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

        let result = service.validate_payment_method(&method, now);
        assert_eq!(result.warnings, vec![WARN_PREPAID.to_string()]);
    }
}
