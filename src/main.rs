//! Entry point for hayate, a tool-calling chat client for the terminal.
//!
//! This binary loads environment variables, installs the log subscriber,
//! parses CLI arguments via [`cli`], and dispatches to the chosen subcommand.

mod cli;

use anyhow::Result;
use hayate::constants::{DEFAULT_LOG_FILTER, LOG_ENV};
use tracing_subscriber::EnvFilter;

/// Runs the hayate CLI.
///
/// Loads `.env` files (silently ignored if absent), sends logs to stderr
/// filtered by `HAYATE_LOG`, and dispatches via [`cli::run`].
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();
    let cli = cli::parse();
    cli::run(cli).await
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
