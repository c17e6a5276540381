//! ostf - Murano health-check runner CLI
//!
//! Runs the Linux-service deployment scenarios against a configured platform
//! endpoint and reports a per-step result.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let code = cli.run().await;
    std::process::exit(code);
}
