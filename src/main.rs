//! Trendwatch one-shot monitor
//!
//! Evaluates the index pool and the watchlist once and sends the alerts.

use chrono::Utc;
use dotenvy::dotenv;
use tracing::info;
use trendwatch::config::Settings;
use trendwatch::core::Components;
use trendwatch::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    logging::init_logging();

    let settings = Settings::from_env()?;
    let timezone = settings.monitor_timezone()?;
    let components = Components::load(settings)?;
    let monitor = components.monitor();

    let today = Utc::now().with_timezone(&timezone).date_naive();
    let summary = monitor.run(today).await?;

    info!(
        evaluated = summary.evaluated,
        skipped = summary.skipped,
        failed = summary.failed,
        "Monitor run finished: {} of {} symbols evaluated",
        summary.evaluated,
        summary.total()
    );

    Ok(())
}
