//! Tutoring-hour billing core.
//!
//! Pure calculations behind the top-up and balance screens:
//!
//! ```text
//! Catalog package → PaymentService → price breakdown / QuickTopUpRequest → payment API
//! Purchased packages + lesson history → BalanceService → totals / status / forecast → UI, alerts
//! ```
//!
//! # Modules
//!
//! - [`payment`] - Package pricing, payment method checks, quick top-up requests
//! - [`balance`] - Remaining hours, balance status, exhaustion forecasting
//! - [`config`] - Thresholds and display settings
//!
//! Every operation takes its inputs by reference, performs no I/O and keeps
//! no state beyond immutable configuration, so services can be shared across
//! threads freely. The current time is always passed in explicitly.

pub mod balance;
pub mod config;
pub mod error;
pub mod money;
pub mod payment;
pub mod types;

// Re-exports for convenience
pub use balance::{
    BalanceLevel, BalanceService, BalanceStatusLevel, Confidence, ExpiryPrediction, LowBalanceAlert,
    RemainingHoursCalculation,
};
pub use config::{BalanceConfig, BillingConfig, PaymentConfig, StatusThresholds};
pub use error::{BillingError, BillingResult};
pub use payment::{
    PaymentCalculationResult, PaymentMethodValidationResult, PaymentService, QuickTopUpRequest,
};
pub use types::{
    CardDetails, ConsumptionRecord, PackageInfo, PaymentMethod, PaymentMethodSelection, TopUpPackage,
};

impl BillingConfig {
    /// Services configured from this config.
    pub fn services(&self) -> (PaymentService, BalanceService) {
        (
            PaymentService::new(self.payment.clone()),
            BalanceService::new(self.balance.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_services_are_shareable() {
        assert_send_sync::<PaymentService>();
        assert_send_sync::<BalanceService>();
    }

    #[test]
    fn test_services_from_default_config() {
        let (payment, balance) = BillingConfig::default().services();
        assert_eq!(payment.config().currency_symbol, "€");
        assert_eq!(balance.config().forecast_window_days(), 28);
    }
}
