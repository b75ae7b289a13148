use super::config::cmd_config;
use super::documents::cmd_documents;
use super::env::CliArgs;
use super::serve::cmd_serve;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Serve(args) => cmd_serve(args, ctx).await,
        Commands::Documents(args) => cmd_documents(args, ctx).await,
        Commands::Config(args) => cmd_config(args, ctx).await,
    }
}
