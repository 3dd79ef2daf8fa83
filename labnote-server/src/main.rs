//! labnote-server - HTTP API for the lab notebook
//!
//! Serves per-user project descriptions, the append-only update log, and
//! the wet/dry lab digests produced by `labnote-summarize`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use labnote_common::config::{resolve_data_root, TomlConfig};
use labnote_common::FileStore;
use labnote_server::{build_router, AppState, Lab};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for labnote-server
#[derive(Parser, Debug)]
#[command(name = "labnote-server")]
#[command(about = "Lab notebook HTTP API")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "LABNOTE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "LABNOTE_PORT")]
    port: Option<u16>,

    /// Directory holding project_descriptions/ and updates/
    #[arg(short, long)]
    data_root: Option<PathBuf>,

    /// Path to config.toml (default: <config_dir>/labnote/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins; otherwise start at info and switch to [logging] level
    // once the config file has been read.
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let (filter, reload_handle) = reload::Layer::new(
        env_filter.unwrap_or_else(|| EnvFilter::new("info,tower_http=info")),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting labnote-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    if !from_env {
        let level = format!("{},tower_http=info", config.logging.level);
        let filter = EnvFilter::try_new(&level)
            .with_context(|| format!("Invalid [logging] level: {}", config.logging.level))?;
        reload_handle
            .reload(filter)
            .context("Failed to apply [logging] level")?;
    }

    let data_root = resolve_data_root(args.data_root.as_deref(), &config);
    tokio::fs::create_dir_all(&data_root)
        .await
        .with_context(|| format!("Failed to create data root {}", data_root.display()))?;

    let lab = Lab::with_seed(config.seed_users()).await;
    info!("Registry initialized with {} user(s)", lab.len().await);

    let state = AppState::new(lab, FileStore::new(data_root));
    let app = build_router(state);

    let host = args
        .host
        .or(config.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = args.port.or(config.port).unwrap_or(DEFAULT_PORT);

    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("labnote-server listening on http://{}", addr);
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
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
