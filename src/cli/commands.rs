use clap::Subcommand;

use super::config::ConfigArgs;
use super::documents::DocumentsArgs;
use super::serve::ServeArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Serve the documents API over HTTP
    Serve(ServeArgs),

    /// Evaluate every document once and print the result
    Documents(DocumentsArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),
}
