//! Trendwatch Worker
//!
//! Runs the monitor on a cron schedule (weekdays 14:00 UTC+8 by default).

use dotenvy::dotenv;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use trendwatch::config::Settings;
use trendwatch::core::{Components, MonitorScheduler};
use trendwatch::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    logging::init_logging();

    let settings = Settings::from_env()?;
    let env = trendwatch::config::get_environment();
    info!("Starting Trendwatch Worker");
    info!(environment = %env, "Environment");

    let timezone = settings.monitor_timezone()?;
    let cron_expr = settings.monitor_cron.clone();
    let components = Components::load(settings)?;
    let monitor = Arc::new(components.monitor());

    let scheduler = MonitorScheduler::new(monitor, &cron_expr, timezone)?;
    if let Some(next) = scheduler.next_run() {
        info!(next = %next, "First monitor run scheduled for {}", next);
    }
    scheduler.start().await;

    info!("Worker started, waiting for shutdown signal...");
    signal::ctrl_c().await?;

    info!("Shutting down worker...");
    scheduler.stop().await;
    info!("Worker stopped");

    Ok(())
}
