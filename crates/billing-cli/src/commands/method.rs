//! Validate-method command - payment method usability.

use crate::commands::Context;
use crate::error::CliResult;
use crate::input::read_json;
use serde::Serialize;
use std::path::Path;
use tracing::warn;
use tutoring_billing::{PaymentMethod, PaymentMethodValidationResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodReport {
    pub display_name: String,
    #[serde(flatten)]
    pub validation: PaymentMethodValidationResult,
}

pub fn execute(ctx: &Context, path: &Path) -> CliResult<serde_json::Value> {
    let method: PaymentMethod = read_json(path, "payment method")?;
    Ok(serde_json::to_value(report(ctx, &method))?)
}

pub fn report(ctx: &Context, method: &PaymentMethod) -> MethodReport {
    let validation = ctx.payment.validate_payment_method(method, ctx.now);
    if !validation.can_process {
        warn!("Payment method {} cannot be charged: {:?}", method.id, validation.errors);
    }

    MethodReport {
        display_name: ctx.payment.payment_method_display_name(method),
        validation,
    }
}
