use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use super::context::CliContext;
use super::dispatch::dispatch;
use super::env::CliArgs;
use super::runtime::{init_logging, log_config_origin};
use crate::config::load_config;

pub async fn run() -> Result<()> {
    let cli = CliArgs::parse();

    let loaded = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| loaded.config.logging.level.clone());
    init_logging(&level, cli.debug)?;

    info!(
        "Starting tb-expiry v{} ({}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_DATE")
    );

    let cli_context = CliContext::new(loaded);
    log_config_origin(&cli_context);

    match dispatch(&cli, &cli_context).await {
        Ok(()) => {
            info!("Command completed successfully");
            Ok(())
        }
        Err(err) => {
            error!("Command failed: {}", err);
            Err(err)
        }
    }
}
