//! Cron-based scheduler for the daily monitor run

use crate::core::monitor::StockMonitor;
use crate::error::ConfigError;
use chrono::{DateTime, FixedOffset, Utc};
use cron::Schedule;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info};

/// Scheduler that runs the [`StockMonitor`] on every tick of a cron expression
pub struct MonitorScheduler {
    monitor: Arc<StockMonitor>,
    schedule: Schedule,
    timezone: FixedOffset,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl MonitorScheduler {
    /// Create a new scheduler
    ///
    /// # Arguments
    /// * `monitor` - Batch run invoked on each tick
    /// * `cron_expr` - Six-field cron expression (second minute hour day month weekday)
    /// * `timezone` - Offset the expression is evaluated in
    pub fn new(
        monitor: Arc<StockMonitor>,
        cron_expr: &str,
        timezone: FixedOffset,
    ) -> Result<Self, ConfigError> {
        let schedule = Schedule::from_str(cron_expr).map_err(|e| {
            ConfigError::Validation(format!("invalid cron expression '{}': {}", cron_expr, e))
        })?;

        info!(
            cron = %cron_expr,
            timezone = %timezone,
            "MonitorScheduler: created (cron: {}, offset {})",
            cron_expr,
            timezone
        );

        Ok(Self {
            monitor,
            schedule,
            timezone,
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Next time the monitor will fire, if the expression has any
    pub fn next_run(&self) -> Option<DateTime<FixedOffset>> {
        self.schedule.upcoming(self.timezone).next()
    }

    /// Start the scheduler
    pub async fn start(&self) {
        let monitor = self.monitor.clone();
        let schedule = self.schedule.clone();
        let timezone = self.timezone;

        let handle = tokio::spawn(async move {
            info!("MonitorScheduler: started, waiting for cron schedule...");

            loop {
                let upcoming = schedule.upcoming(timezone).next();
                let next_tick = match upcoming {
                    Some(next_tick) => next_tick,
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                };

                info!(next = %next_tick, "MonitorScheduler: next run at {}", next_tick);
                let now = Utc::now().with_timezone(&timezone);
                if next_tick > now {
                    let duration = (next_tick - now).to_std().unwrap_or_default();
                    tokio::time::sleep(duration).await;
                }

                let date = next_tick.date_naive();
                info!(date = %date, "MonitorScheduler: cron tick, running monitor");
                match monitor.run(date).await {
                    Ok(summary) => info!(
                        evaluated = summary.evaluated,
                        skipped = summary.skipped,
                        failed = summary.failed,
                        "MonitorScheduler: run complete"
                    ),
                    Err(e) => error!(error = %e, "MonitorScheduler: could not load symbol lists"),
                }
            }
        });

        let mut h = self.handle.write().await;
        *h = Some(handle);
        info!("MonitorScheduler: started successfully");
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        let mut handle = self.handle.write().await;
        if let Some(h) = handle.take() {
            h.abort();
            info!("MonitorScheduler: stopped");
        }
    }

    /// Check if the scheduler is running
    pub async fn is_running(&self) -> bool {
        let handle = self.handle.read().await;
        handle.is_some()
    }
}
