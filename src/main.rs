use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod handlers;
mod helpers;
mod openapi_tests;
mod router;
mod schemas;
mod test_utils;

use cli::Cli;

/// Main entry point for the Stockdash application.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockdash=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Environment overrides for the source-file arguments
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.run().await?;

    Ok(())
}
