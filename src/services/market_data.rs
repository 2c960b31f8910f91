//! Market data provider interface.

use crate::error::MarketDataError;
use crate::models::indicators::PriceBar;
use async_trait::async_trait;
use std::collections::HashMap;

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Most recent `limit` daily bars for a symbol, ascending by date.
    ///
    /// An unknown symbol or a provider without data yields an empty series,
    /// not an error.
    async fn get_daily_bars(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PriceBar>, MarketDataError>;
}

/// In-memory provider serving fixed series, used for dry runs and tests.
#[derive(Default)]
pub struct StaticMarketDataProvider {
    series: HashMap<String, Vec<PriceBar>>,
    failures: HashMap<String, String>,
}

impl StaticMarketDataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, symbol: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        self.series.insert(symbol.into(), bars);
        self
    }

    /// Make every request for `symbol` fail with a malformed-payload error.
    pub fn with_failure(mut self, symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(symbol.into(), reason.into());
        self
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        if let Some(reason) = self.failures.get(symbol) {
            return Err(MarketDataError::MalformedPayload(reason.clone()));
        }
        let bars = self.series.get(symbol).cloned().unwrap_or_default();
        let skip = bars.len().saturating_sub(limit);
        Ok(bars.into_iter().skip(skip).collect())
    }
}
