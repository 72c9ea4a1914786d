//! Service command-line entry point.

use anyhow::Context;
use clap::Parser;

use kala_service::{options::CliOptions, start_service};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenv::dotenv().ok();

    let cli_opts = CliOptions::parse();

    let service_opts = cli_opts
        .into_service_options()
        .context("Failed to parse options")?;

    start_service(service_opts).await.context("Service failed")?;

    Ok(())
}
