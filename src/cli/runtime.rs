use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use super::context::CliContext;

pub fn init_logging(level: &str, debug: bool) -> Result<()> {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        level.parse().context("Invalid log level")?
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

pub fn log_config_origin(ctx: &CliContext) {
    if ctx.config_file_found() {
        info!("Loaded configuration from: {}", ctx.config_path().display());
    } else {
        warn!(
            "Config file not found, using defaults: {}",
            ctx.config_path().display()
        );
    }
    if !ctx.env_overrides().is_empty() {
        info!(overrides = ?ctx.env_overrides(), "Applied environment overrides");
    }
}
