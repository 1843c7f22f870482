mod asr;
mod config;
mod error;
mod handlers;
mod render;
mod routes;
mod state;
mod transcription;
mod upload;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("transcribe_web=debug,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration - falls back to defaults when no file exists
    let config = load_config()?;

    let app_state = AppState::new(config.clone())?;
    info!(
        "Using recognition endpoint {} (model {})",
        config.recognition.base_url, config.recognition.model
    );

    // Build application
    let app = routes::create_routes(app_state);

    // Host may be a name such as "localhost", so let the listener resolve it
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Use the first config file found, or defaults when none exists.
fn load_config() -> Result<Config> {
    // An explicit path must exist; only the implicit locations are optional
    if let Some(path) = std::env::var_os("CONFIG_PATH") {
        let path = std::path::PathBuf::from(path);
        if !path.exists() {
            anyhow::bail!("CONFIG_PATH points to a missing file: {}", path.display());
        }
    }

    for path in Config::search_paths() {
        if !path.exists() {
            debug!("No config at {}", path.display());
            continue;
        }
        let config = Config::load(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?;
        info!("Loaded configuration from: {}", path.display());
        return Ok(config);
    }

    info!("No configuration file found, using defaults");
    Ok(Config::default())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
