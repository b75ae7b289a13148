use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use freshness_gate::{Evaluation, FreshnessEvaluator};

use crate::catalog::load_catalog;
use crate::cli::context::CliContext;
use crate::cli::output::OutputFormat;

#[derive(Args, Clone, Debug)]
pub struct DocumentsArgs {
    /// CSV source file (overrides `source.path`)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub async fn cmd_documents(args: DocumentsArgs, ctx: &CliContext) -> Result<()> {
    let mut source = ctx.config().source.clone();
    if let Some(data) = args.data {
        source.path = data;
    }

    let (catalog, _report) = load_catalog(&source, Utc::now(), FreshnessEvaluator::system());
    let documents = catalog.list_documents();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&documents)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&documents)?),
        OutputFormat::Human => print!("{}", render_table(&documents)),
    }
    Ok(())
}

fn render_table(documents: &[Evaluation]) -> String {
    if documents.is_empty() {
        return "No documents loaded.\n".to_string();
    }

    let title_width = documents
        .iter()
        .map(|doc| doc.title.len())
        .max()
        .unwrap_or(0)
        .max("TITLE".len());

    let mut out = format!(
        "{:>5}  {:<title_width$}  {:>10}  {:<7}  {:>5}\n",
        "ID", "TITLE", "TOTAL", "STATUS", "SCORE"
    );
    for doc in documents {
        out.push_str(&format!(
            "{:>5}  {:<title_width$}  {:>10}  {:<7}  {:>5}\n",
            doc.id.value(),
            doc.title,
            doc.notifications_total,
            doc.status.as_str(),
            doc.freshness_score
        ));
    }
    out
}
