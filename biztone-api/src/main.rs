//! biztone-api - BizTone Converter microservice
//!
//! **Module Identity:**
//! - Name: biztone-api
//! - Default port: 5001 (127.0.0.1)
//!
//! Serves `/`, `/health` and `/api/convert`.

use anyhow::{Context, Result};
use biztone_common::config::{resolve_api_key_from_env, TomlConfig};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use biztone_api::{build_router, AppState, Converter, ErrorLog};

/// Command-line arguments for biztone-api
#[derive(Parser, Debug)]
#[command(name = "biztone-api")]
#[command(about = "Business tone converter HTTP service")]
#[command(version)]
struct Args {
    /// Address to bind (overrides config file)
    #[arg(long, env = "BIZTONE_HOST")]
    host: Option<String>,

    /// Port to listen on (overrides config file)
    #[arg(short, long, env = "BIZTONE_PORT")]
    port: Option<u16>,

    /// TOML config file (defaults to <config_dir>/biztone/config.toml)
    #[arg(short, long, env = "BIZTONE_CONFIG")]
    config: Option<PathBuf>,

    /// Append-only log for upstream failures (overrides config file)
    #[arg(long, env = "BIZTONE_ERROR_LOG")]
    error_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal
    let dotenv_path = dotenvy::dotenv().ok();

    let args = Args::parse();

    let loaded = TomlConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    let config = loaded.config;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting BizTone Converter (biztone-api) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }
    match &loaded.path {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let api_key = resolve_api_key_from_env(&config);
    let converter = Converter::from_config(api_key, &config.completion);

    let error_log_path = args.error_log.unwrap_or(config.logging.error_log);
    info!("Error log: {}", error_log_path.display());

    let state = AppState::new(converter, ErrorLog::new(error_log_path))
        .with_max_body_bytes(config.server.max_body_bytes);
    let app = build_router(state);

    let host = args.host.unwrap_or(config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("biztone-api listening on http://{}", addr);
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
            Ok(mut stream) => {
                stream.recv().await;
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
            info!("Received SIGTERM, shutting down");
        },
    }
}
