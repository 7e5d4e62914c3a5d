use std::net::SocketAddr;

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use inquire::{Password, Text};
use niwa_uv_core::{Config, UvReading, source_from_config, uv_forecast};

use crate::routes::{self, AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "niwa-uv", version, about = "NIWA UV forecast proxy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the UV endpoint over HTTP.
    Serve {
        /// Address to listen on.
        #[arg(long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Serve the UV endpoint from inside AWS Lambda.
    Lambda,

    /// Fetch the forecast once and print it.
    Fetch {
        /// Print the JSON body the endpoint would return.
        #[arg(long)]
        json: bool,
    },

    /// Store NIWA credentials in the config file.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind } => serve(bind).await,
            Command::Lambda => {
                let state = AppState::new(load_config()?);
                lambda_http::run(routes::router(state))
                    .await
                    .map_err(|err| anyhow!(err))
            }
            Command::Fetch { json } => fetch(json).await,
            Command::Configure => configure(),
        }
    }
}

fn load_config() -> anyhow::Result<Config> {
    let config = Config::resolve()?;
    if let Err(err) = config.credentials() {
        // Requests will fail with a configuration error until this is fixed.
        tracing::warn!("{err}");
    }
    Ok(config)
}

async fn serve(bind: SocketAddr) -> anyhow::Result<()> {
    let state = AppState::new(load_config()?);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!("listening on {}{}", listener.local_addr()?, routes::UV_PATH);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

async fn fetch(json: bool) -> anyhow::Result<()> {
    let config = Config::resolve()?;
    let source = source_from_config(&config, reqwest::Client::new())?;
    let readings = uv_forecast(source.as_ref()).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
    } else {
        print_table(&readings);
    }

    Ok(())
}

fn print_table(readings: &[UvReading]) {
    println!("{:<10} {:>6} {:>6}", "time", "sunny", "cloudy");
    for r in readings {
        println!("{:<10} {:>6.2} {:>6.2}", r.time, r.sunny, r.cloudy);
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let url = Text::new("NIWA API URL:")
        .with_initial_value(config.api_url.as_deref().unwrap_or_default())
        .prompt()?;
    let key = Password::new("NIWA API key:").without_confirmation().prompt()?;
    let secret = Password::new("NIWA API secret:").without_confirmation().prompt()?;

    config.api_url = Some(url);
    config.api_key = Some(key);
    config.api_secret = Some(secret);

    config
        .credentials()
        .context("Refusing to save incomplete configuration")?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
