//! Signal engine: fetch once, run structure then timing over the same series.

use crate::error::SignalError;
use crate::models::indicators::PriceBar;
use crate::models::signal::{IndexResult, SignalOutcome, SignalResult};
use crate::models::strategy::StrategyConfig;
use crate::services::market_data::MarketDataProvider;
use crate::signals::structure::StructureSignal;
use crate::signals::timing::TimingSignal;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_BAR_LIMIT: usize = 250;

pub struct SignalEngine {
    config: Arc<StrategyConfig>,
    provider: Arc<dyn MarketDataProvider>,
    structure: StructureSignal,
    timing: TimingSignal,
    bar_limit: usize,
}

impl SignalEngine {
    pub fn new(config: Arc<StrategyConfig>, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self {
            structure: StructureSignal::new(config.clone()),
            timing: TimingSignal::new(config.clone()),
            config,
            provider,
            bar_limit: 0,
        }
        .with_bar_limit(DEFAULT_BAR_LIMIT)
    }

    /// Number of daily bars requested per symbol. Never below what the strategy needs.
    pub fn with_bar_limit(mut self, bar_limit: usize) -> Self {
        self.bar_limit = bar_limit.max(self.required_bars());
        self
    }

    pub fn bar_limit(&self) -> usize {
        self.bar_limit
    }

    pub fn config(&self) -> &Arc<StrategyConfig> {
        &self.config
    }

    /// Bars a full stock evaluation needs under the current strategy.
    pub fn required_bars(&self) -> usize {
        self.structure
            .required_bars()
            .max(self.timing.required_bars())
    }

    /// Fetch and evaluate a stock. An empty series is reported as `NoData`.
    pub async fn evaluate(&self, symbol: &str) -> Result<SignalOutcome<SignalResult>, SignalError> {
        let bars = self.provider.get_daily_bars(symbol, self.bar_limit).await?;
        if bars.is_empty() {
            debug!(symbol = %symbol, "SignalEngine: provider returned no bars for {}", symbol);
            return Ok(SignalOutcome::NoData {
                symbol: symbol.to_string(),
            });
        }
        self.evaluate_series(symbol, &bars)
            .map(SignalOutcome::Evaluated)
    }

    /// Fetch and evaluate a market index with the structure signal only.
    pub async fn evaluate_index(
        &self,
        symbol: &str,
    ) -> Result<SignalOutcome<IndexResult>, SignalError> {
        let bars = self.provider.get_daily_bars(symbol, self.bar_limit).await?;
        if bars.is_empty() {
            debug!(symbol = %symbol, "SignalEngine: provider returned no bars for index {}", symbol);
            return Ok(SignalOutcome::NoData {
                symbol: symbol.to_string(),
            });
        }
        self.evaluate_index_series(symbol, &bars)
            .map(SignalOutcome::Evaluated)
    }

    /// Evaluate an already fetched series.
    pub fn evaluate_series(
        &self,
        symbol: &str,
        bars: &[PriceBar],
    ) -> Result<SignalResult, SignalError> {
        ensure_ascending(bars)?;
        let structure = self.structure.evaluate(bars)?;
        let timing = self.timing.evaluate(bars)?;

        debug!(
            symbol = %symbol,
            bars = bars.len(),
            trend = %structure.trend,
            timing_ok = timing.timing_ok,
            "SignalEngine: evaluated {} over {} bars",
            symbol,
            bars.len()
        );

        Ok(SignalResult::new(symbol, structure, timing))
    }

    pub fn evaluate_index_series(
        &self,
        symbol: &str,
        bars: &[PriceBar],
    ) -> Result<IndexResult, SignalError> {
        ensure_ascending(bars)?;
        let structure = self.structure.evaluate(bars)?;

        debug!(
            symbol = %symbol,
            bars = bars.len(),
            trend = %structure.trend,
            "SignalEngine: evaluated index {} over {} bars",
            symbol,
            bars.len()
        );

        Ok(IndexResult::new(symbol, structure))
    }
}

fn ensure_ascending(bars: &[PriceBar]) -> Result<(), SignalError> {
    match bars.windows(2).position(|pair| pair[1].date <= pair[0].date) {
        Some(index) => Err(SignalError::UnorderedSeries { index: index + 1 }),
        None => Ok(()),
    }
}
