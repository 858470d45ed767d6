//! Docket Router CLI
//!
//! Starts the HTTP server for recidivism risk predictions.

use anyhow::Context;
use clap::Parser;
use docket_router::{config::RouterConfig, start_server};
use std::path::PathBuf;
use std::process;

/// Recidivism risk prediction service
#[derive(Debug, Parser)]
#[command(name = "docket-router", version, about)]
struct Cli {
    /// Load configuration from a TOML file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the prediction database (e.g. sqlite:///predictions.db)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RouterConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            eprintln!("Warning: No config file specified, using default test configuration");
            eprintln!("Usage: docket-router --config <path-to-config.toml>");
            eprintln!();
            RouterConfig::default_test_config()
        }
    };

    if let Some(url) = &cli.database_url {
        config = config.with_database_url(url)?;
    }

    start_server(config).await?;

    Ok(())
}
