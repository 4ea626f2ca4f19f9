//! CLI command handlers.

mod balance;
mod forecast;
mod method;
mod price;
mod top_up;

use crate::error::CliResult;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use std::path::PathBuf;
use tutoring_billing::{BalanceService, PaymentService};

/// Shared state for a single invocation.
pub struct Context {
    pub payment: PaymentService,
    pub balance: BalanceService,
    /// Clock every time-dependent check is evaluated against.
    pub now: DateTime<Utc>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price breakdown of a top-up package.
    Price {
        /// Package JSON file (`-` for stdin).
        package: PathBuf,
    },

    /// Check whether a saved payment method can be charged.
    ValidateMethod {
        /// Payment method JSON file (`-` for stdin).
        method: PathBuf,
    },

    /// Build a quick top-up request.
    QuickTopUp {
        #[arg(long)]
        package_id: u64,

        /// Saved payment method to charge.
        #[arg(long, conflicts_with = "use_default")]
        payment_method: Option<String>,

        /// Charge the account's default payment method.
        #[arg(long)]
        use_default: bool,

        /// Student email when purchasing on their behalf.
        #[arg(long)]
        email: Option<String>,
    },

    /// Remaining hours, status and low-balance alert.
    Balance {
        /// Package list JSON file (`-` for stdin).
        packages: PathBuf,
    },

    /// Predict when the remaining hours run out.
    Forecast {
        /// Package list JSON file.
        packages: PathBuf,
        /// Consumption history JSON file.
        history: PathBuf,
    },
}

/// Execute a command and return its JSON output.
pub fn run(command: &Command, ctx: &Context) -> CliResult<serde_json::Value> {
    match command {
        Command::Price { package } => price::execute(ctx, package),
        Command::ValidateMethod { method } => method::execute(ctx, method),
        Command::QuickTopUp {
            package_id,
            payment_method,
            use_default,
            email,
        } => top_up::execute(
            ctx,
            *package_id,
            top_up::selection(payment_method.as_deref(), *use_default),
            email.as_deref(),
        ),
        Command::Balance { packages } => balance::execute(ctx, packages),
        Command::Forecast { packages, history } => forecast::execute(ctx, packages, history),
    }
}
