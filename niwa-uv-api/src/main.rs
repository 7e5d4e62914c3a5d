//! Binary crate for the `niwa-uv` proxy.
//!
//! This crate focuses on:
//! - Exposing the UV forecast over HTTP (locally or on AWS Lambda)
//! - Parsing CLI arguments
//! - Interactive configuration

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
