//! CLI surface for the `sitecraftd` binary (§6.4): a single `serve`
//! subcommand over the env-sourced `AppConfig`.

use clap::{Parser, Subcommand};
use sitecraft_infra::config::AppConfig;

use crate::http::router::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "sitecraftd", version, about = "Draft lifecycle and config-generation service")]
pub struct Cli {
    #[command(flatten)]
    pub config: AppConfig,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Boots the HTTP API and serves it until shutdown.
    Serve,
}

/// Boots `AppState`, builds the router, and serves it with graceful
/// shutdown on Ctrl+C / SIGTERM.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let state = AppState::init(&config).await?;
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "sitecraftd listening");

    let router = build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("sitecraftd stopped");
    Ok(())
}

/// Waits for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
