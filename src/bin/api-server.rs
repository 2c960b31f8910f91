//! Trendwatch API Server
//!
//! Serves on-demand stock and index evaluations, the watchlist and metrics over HTTP.

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use trendwatch::config::Settings;
use trendwatch::core::{start_server, AppState, Components};
use trendwatch::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let settings = Settings::from_env()?;
    let port = settings.port;

    let env = trendwatch::config::get_environment();
    info!("Starting Trendwatch API Server");
    info!(environment = %env, "Environment");

    let components = Components::load(settings)?;
    let mut state = AppState::new(
        components.engine.clone(),
        components.metrics.clone(),
        components.settings.watchlist_path.clone(),
    );
    if let Some(explainer) = &components.explainer {
        state = state.with_explainer(Arc::clone(explainer));
    }

    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(state, port).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
