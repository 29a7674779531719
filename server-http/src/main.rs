//! MusicBox API server binary.

use anyhow::Context;
use core_catalog::db::create_pool;
use server_http::router::build_router;
use server_http::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let config = ServerConfig::from_env();

    let pool = create_pool(config.database_config())
        .await
        .context("failed to open the catalog database")?;

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "MusicBox API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Default filter keeps our crates at debug and dependencies at warn.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(
            "server_http=debug,core_catalog=debug,core_auth=debug,tower_http=debug,sqlx=warn",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact())
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
    }

    info!("Shutting down");
}
