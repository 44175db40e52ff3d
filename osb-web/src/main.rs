//! osu! Specialist Bank (osb-web) - Main entry point
//!
//! Serves leaderboards aggregated from the JSON score sources in the data
//! folder.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use osb_common::config::{load_config, resolve_data_folder};
use osb_common::Translations;
use osb_web::{build_router, AppState};

/// Command-line arguments for osb-web
#[derive(Parser, Debug)]
#[command(name = "osb-web")]
#[command(about = "Leaderboard web service for the osu! Specialist Bank")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "OSB_PORT")]
    port: Option<u16>,

    /// Host to bind (overrides config file)
    #[arg(long, env = "OSB_HOST")]
    host: Option<String>,

    /// Folder holding score sources and translations
    #[arg(short, long)]
    data_folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, env = "OSB_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config supplies the log level, so its outcome is logged after init
    let (config, config_source) = load_config(args.config.as_deref());

    // Initialize tracing; RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "osb_web={level},osb_engine={level},osb_common={level},tower_http=info",
                    level = config.logging.level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting osu! Specialist Bank (osb-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    config_source.log();
    info!("Log level: {}", config.logging.level);

    let data_folder = resolve_data_folder(args.data_folder.as_deref(), &config);
    info!("Data folder: {}", data_folder.display());

    let sources = config.source_paths(&data_folder);
    for source in &sources {
        info!("Score source: {}", source.display());
    }

    let translations =
        Translations::load_or_builtin(&config.translations_path(&data_folder), &config.default_language);

    let state = AppState::new(sources, translations);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.host);
    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("osb-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
