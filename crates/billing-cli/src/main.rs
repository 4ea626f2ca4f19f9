//! Tutoring billing CLI - Main entry point.

mod commands;
mod error;
mod input;

use crate::commands::{Command, Context};
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tutoring_billing::BillingConfig;

/// Price top-up packages, check payment methods and forecast hour balances.
///
/// Results are printed to stdout as JSON; logs go to stderr.
#[derive(Debug, Parser)]
#[command(name = "billing-cli", version)]
struct Cli {
    /// Evaluate expiry checks and forecasts at this instant (RFC 3339)
    /// instead of the system clock.
    #[arg(long, global = true)]
    now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = BillingConfig::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log_level, config.log_json);

    let (payment, balance) = config.services();
    let ctx = Context {
        payment,
        balance,
        now: cli.now.unwrap_or_else(Utc::now),
    };
    debug!("Running {:?} at {}", cli.command, ctx.now);

    let output = commands::run(&cli.command, &ctx).inspect_err(|e| error!("{}", e))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to render output")?
    );
    Ok(())
}

fn init_logging(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
