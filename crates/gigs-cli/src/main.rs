//! gigs - an interactive shell for the gigs listing service.
//!
//! Sign up, sign in, list and post gigs from the terminal. The bearer token
//! lives only as long as the shell process.

mod format;
mod shell;

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gigs_core::{Config, GigClient};

use shell::Shell;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = Config::load().context("Failed to load configuration")?;
    let client = GigClient::new(&config).context("Failed to create API client")?;
    info!(base_url = %client.transport().base_url(), "gigs starting");

    let mut shell = Shell::new(client, config);
    shell.run().await?;

    info!("gigs shutting down");
    Ok(())
}
