use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use trainerhub::{
    api::{create_routes, AppState},
    config::AppConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;

    // A store that cannot be opened degrades the server instead of stopping it.
    let store = match config.database.connect().await {
        Ok(Some(store)) => {
            info!("database store initialized");
            Some(store)
        }
        Ok(None) => {
            warn!("DATABASE_URL not set; running without a database");
            None
        }
        Err(error) => {
            error!(error = %format!("{error:#}"), "failed to initialize database store");
            None
        }
    };

    let app = create_routes(AppState::new(store.clone(), config.database.clone()));

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!("Private Trainer API listening on http://{address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = store {
        store.shutdown().await?;
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!(%error, "failed to listen for shutdown signal");
    }
}
