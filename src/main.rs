//! Server entry point for the paper proxy.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use paper_proxy::{Catalog, HttpClient, ProxyService, ProxySettings, ResourceLibrary, api};
use tracing::{debug, info, warn};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.default_log_level()));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if args.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    debug!(?args, "CLI arguments parsed");
    info!(version = env!("CARGO_PKG_VERSION"), "paper-proxy starting");

    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("failed to load catalog {}", args.catalog.display()))?;

    let resources = match &args.resources {
        Some(path) => ResourceLibrary::load(path)
            .with_context(|| format!("failed to load resource library {}", path.display()))?,
        None => ResourceLibrary::builtin().context("built-in resource table is invalid")?,
    };

    let settings = ProxySettings::new(
        args.download_timeout(),
        args.verify_timeout(),
        args.batch_concurrency(),
    )?;
    let client = HttpClient::new()?;

    info!(
        papers = catalog.len(),
        resources = resources.len(),
        batch_concurrency = settings.batch_concurrency(),
        "catalog ready"
    );

    let proxy = ProxyService::new(catalog, resources, Arc::new(client), settings);
    let app = api::router(proxy);

    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!(addr = %args.bind, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("paper-proxy stopped");
    Ok(())
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
