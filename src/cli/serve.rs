use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use freshness_gate::FreshnessEvaluator;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::catalog::load_catalog;
use crate::cli::context::CliContext;
use crate::server::{build_router, ServeState};

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    /// Interface to bind (overrides `server.host`)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    pub port: Option<u16>,

    /// CSV source file (overrides `source.path`)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,
}

pub async fn cmd_serve(args: ServeArgs, ctx: &CliContext) -> Result<()> {
    let mut server = ctx.config().server.clone();
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    let mut source = ctx.config().source.clone();
    if let Some(data) = args.data {
        source.path = data;
    }

    let started_at = Utc::now();
    let (catalog, report) = load_catalog(&source, started_at, FreshnessEvaluator::system());
    if report.failure.is_some() {
        warn!(
            path = %source.path.display(),
            "No documents available; serving an empty catalog"
        );
    }
    info!(documents = catalog.len(), "Total Documents Loaded: {}", catalog.len());

    let router = build_router(ServeState::new(catalog));

    let addr = server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind server on {}", addr))?;
    info!("TB notification service available at http://{}", addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited unexpectedly")?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
