//! CLI error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read {path:?}: {source}")]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid {what} JSON: {source}")]
    Parse {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Billing(#[from] tutoring_billing::BillingError),
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
