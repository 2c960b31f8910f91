//! Daily batch run: index pool first, then the watchlist, one symbol at a time.

use crate::agents::Explainer;
use crate::error::{ExplainError, SignalError, WatchlistError};
use crate::metrics::Metrics;
use crate::models::signal::SignalOutcome;
use crate::notifiers::formatter::{format_date_marker, format_index_message, format_stock_message};
use crate::notifiers::NotificationManager;
use crate::services::watchlist::{load_watchlist_or_empty, Watchlist};
use crate::signals::SignalEngine;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub evaluated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl MonitorSummary {
    pub fn total(&self) -> usize {
        self.evaluated + self.skipped + self.failed
    }
}

#[derive(Debug, Clone, Copy)]
enum SymbolKind {
    Stock,
    Index,
}

impl SymbolKind {
    fn label(self) -> &'static str {
        match self {
            SymbolKind::Stock => "stock",
            SymbolKind::Index => "index",
        }
    }
}

enum SymbolOutcome {
    Evaluated,
    Skipped,
}

pub struct StockMonitor {
    engine: Arc<SignalEngine>,
    notifier: Arc<NotificationManager>,
    explainer: Option<Arc<dyn Explainer>>,
    metrics: Arc<Metrics>,
    watchlist_path: PathBuf,
    index_pool_path: PathBuf,
    delay: Duration,
}

impl StockMonitor {
    pub fn new(
        engine: Arc<SignalEngine>,
        notifier: Arc<NotificationManager>,
        metrics: Arc<Metrics>,
        watchlist_path: impl Into<PathBuf>,
        index_pool_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            engine,
            notifier,
            explainer: None,
            metrics,
            watchlist_path: watchlist_path.into(),
            index_pool_path: index_pool_path.into(),
            delay: Duration::from_millis(1000),
        }
    }

    pub fn with_explainer(mut self, explainer: Arc<dyn Explainer>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    /// Pause between two consecutive symbols.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Reload the watchlist and index pool from disk, then run the batch.
    pub async fn run(&self, date: NaiveDate) -> Result<MonitorSummary, WatchlistError> {
        let index_pool = load_watchlist_or_empty(&self.index_pool_path)?;
        let watchlist = load_watchlist_or_empty(&self.watchlist_path)?;
        Ok(self.run_with(date, &index_pool, &watchlist).await)
    }

    /// Run the batch over explicit name → code maps.
    pub async fn run_with(
        &self,
        date: NaiveDate,
        index_pool: &Watchlist,
        watchlist: &Watchlist,
    ) -> MonitorSummary {
        let marker = format_date_marker(date);
        info!("{}", marker);
        self.dispatch(&marker).await;

        info!(
            indices = index_pool.len(),
            stocks = watchlist.len(),
            "StockMonitor: starting batch"
        );

        let mut summary = MonitorSummary::default();
        let symbols = index_pool
            .iter()
            .map(|(name, code)| (SymbolKind::Index, name, code))
            .chain(
                watchlist
                    .iter()
                    .map(|(name, code)| (SymbolKind::Stock, name, code)),
            );

        let mut first = true;
        for (kind, name, code) in symbols {
            if !first && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            first = false;

            let started = Instant::now();
            let outcome = match kind {
                SymbolKind::Index => self.check_index(code, name).await,
                SymbolKind::Stock => self.check_stock(code, name).await,
            };
            self.metrics
                .signal_evaluation_duration_seconds
                .observe(started.elapsed().as_secs_f64());

            match outcome {
                Ok(SymbolOutcome::Evaluated) => {
                    summary.evaluated += 1;
                    self.metrics
                        .signal_evaluations_total
                        .with_label_values(&[kind.label()])
                        .inc();
                }
                Ok(SymbolOutcome::Skipped) => {
                    summary.skipped += 1;
                    warn!(symbol = %code, display_name = %name, "No market data for {}, skipped", code);
                }
                Err(e) => {
                    summary.failed += 1;
                    self.metrics
                        .signal_evaluation_failures_total
                        .with_label_values(&[kind.label()])
                        .inc();
                    error!(symbol = %code, display_name = %name, kind = kind.label(), error = %e, "Error processing {}", code);
                }
            }
        }

        info!(
            evaluated = summary.evaluated,
            skipped = summary.skipped,
            failed = summary.failed,
            "StockMonitor: batch finished"
        );
        summary
    }

    async fn check_index(&self, code: &str, name: &str) -> Result<SymbolOutcome, SignalError> {
        let result = match self.engine.evaluate_index(code).await? {
            SignalOutcome::NoData { .. } => return Ok(SymbolOutcome::Skipped),
            SignalOutcome::Evaluated(result) => result.with_name(name),
        };

        let mut message = format_index_message(&result, self.engine.config());
        if let Some(explainer) = &self.explainer {
            let commentary = explainer.explain_indices(std::slice::from_ref(&result)).await;
            append_commentary(&mut message, code, commentary);
        }
        debug!("{}", message);
        self.dispatch(&message).await;
        Ok(SymbolOutcome::Evaluated)
    }

    async fn check_stock(&self, code: &str, name: &str) -> Result<SymbolOutcome, SignalError> {
        let result = match self.engine.evaluate(code).await? {
            SignalOutcome::NoData { .. } => return Ok(SymbolOutcome::Skipped),
            SignalOutcome::Evaluated(result) => result.with_name(name),
        };

        let mut message = format_stock_message(&result, self.engine.config());
        if let Some(explainer) = &self.explainer {
            let commentary = explainer.explain_stock(&result).await;
            append_commentary(&mut message, code, commentary);
        }
        debug!("{}", message);
        self.dispatch(&message).await;
        Ok(SymbolOutcome::Evaluated)
    }

    async fn dispatch(&self, message: &str) {
        match self.notifier.notify(message).await {
            Ok(_) => self
                .metrics
                .notifications_sent_total
                .with_label_values(&["ok"])
                .inc(),
            Err(e) => {
                self.metrics
                    .notifications_sent_total
                    .with_label_values(&["error"])
                    .inc();
                warn!(error = %e, "Notification dispatch incomplete");
            }
        }
    }
}

fn append_commentary(message: &mut String, code: &str, commentary: Result<String, ExplainError>) {
    match commentary {
        Ok(text) => {
            message.push_str("\n\nCommentary:\n");
            message.push_str(text.trim());
        }
        Err(ExplainError::Disabled) => {}
        Err(e) => warn!(symbol = %code, error = %e, "Explanation failed for {}, sending plain message", code),
    }
}
