use clap::Parser;
use std::path::PathBuf;

use super::commands::Commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level (defaults to `logging.level` from the configuration)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}
