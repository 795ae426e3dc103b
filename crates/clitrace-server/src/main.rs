//! Clitrace Server CLI
//!
//! Starts the HTTP server for CLI extraction and correlation.

use anyhow::Context;
use clap::Parser;
use clitrace_server::{config::ServerConfig, start_server};
use std::path::PathBuf;
use std::process;

/// Clitrace Server - CLI extraction and call-record correlation
#[derive(Debug, Parser)]
#[command(name = "clitrace-server", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(long, env = "CLITRACE_CONFIG")]
    config: Option<PathBuf>,
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
        Some(path) => ServerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => {
            eprintln!("Warning: No config file specified, using defaults");
            eprintln!("Usage: clitrace-server --config <path-to-config.toml>");
            eprintln!();
            ServerConfig::default_config()
        }
    };

    config
        .apply_env()
        .context("applying search settings from the environment")?;

    start_server(config).await?;

    Ok(())
}
