//! Gateway binary.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gateway::{run_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::parse();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        demo_mode = config.demo_mode,
        model = %config.cards_model,
        "Starting gateway"
    );

    run_server(&config).await
}
