//! Billing error types.

use thiserror::Error;

/// Errors that can occur while validating or pricing a top-up.
///
/// Every variant is an input problem; nothing here represents an I/O or
/// system fault, so callers surface these directly to the user.
#[derive(Error, Debug)]
pub enum BillingError {
    /// A required field is missing or an exclusivity rule is violated.
    ///
    /// Displays as the bare message so UI handlers can show it verbatim.
    #[error("{0}")]
    Validation(String),

    /// A decimal amount could not be parsed or is out of range.
    #[error("Invalid amount for {field}: {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BillingError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }
}

impl From<config::ConfigError> for BillingError {
    fn from(e: config::ConfigError) -> Self {
        BillingError::Config(e.to_string())
    }
}

/// Result type alias for billing operations.
pub type BillingResult<T> = Result<T, BillingError>;
