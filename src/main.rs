//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `ivas_sms_analyzer` library that
//! handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Starting the HTTP API server
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use ivas_sms_analyzer::initialization::init_logger_with;
use ivas_sms_analyzer::portal::ReqwestFetcher;
use ivas_sms_analyzer::{start_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let fetcher = ReqwestFetcher::new().context("Failed to initialize HTTP client")?;

    match start_server(config.port, fetcher).await {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("ivas_sms_analyzer error: {:#}", e);
            process::exit(1);
        }
    }
}
