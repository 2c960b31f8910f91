//! Daily K-line provider backed by the Sina finance JSON endpoint.
//!
//! Serves both A-share stocks and indices (`sh600519`, `sh000300`, ...).
//! Numeric fields arrive as strings and the endpoint answers `null` for
//! unknown symbols.

use crate::config::DEFAULT_MARKET_DATA_BASE_URL;
use crate::error::MarketDataError;
use crate::models::indicators::PriceBar;
use crate::services::market_data::MarketDataProvider;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const KLINE_PATH: &str = "/quotes_service/api/json_v2.php/CN_MarketData.getKLineData";
const DAILY_SCALE: &str = "240";

#[derive(Debug, Deserialize)]
struct SinaKline {
    day: String,
    open: String,
    high: String,
    low: String,
    close: String,
    volume: String,
}

pub struct SinaMarketDataProvider {
    client: reqwest::Client,
    base_url: String,
    max_retries: usize,
}

impl SinaMarketDataProvider {
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_base_url(DEFAULT_MARKET_DATA_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, MarketDataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self::with_client(base_url, client))
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_retries: 3,
        }
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn fetch_once(&self, symbol: &str, limit: usize) -> Result<Vec<PriceBar>, MarketDataError> {
        let url = format!("{}{}", self.base_url, KLINE_PATH);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("scale", DAILY_SCALE),
                ("ma", "no"),
                ("datalen", &limit.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_kline_payload(&body, limit)
    }
}

#[async_trait]
impl MarketDataProvider for SinaMarketDataProvider {
    async fn get_daily_bars(
        &self,
        symbol: &str,
        limit: usize,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        let bars = (|| async { self.fetch_once(symbol, limit).await })
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(200))
                    .with_max_times(self.max_retries),
            )
            .when(is_transient)
            .notify(|err: &MarketDataError, delay: Duration| {
                warn!(
                    symbol = %symbol,
                    error = %err,
                    delay_ms = delay.as_millis() as u64,
                    "SinaMarketDataProvider: retrying {} after error",
                    symbol
                );
            })
            .await?;

        debug!(symbol = %symbol, count = bars.len(), "SinaMarketDataProvider: fetched {} bars for {}", bars.len(), symbol);
        Ok(bars)
    }
}

fn is_transient(err: &MarketDataError) -> bool {
    match err {
        MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        MarketDataError::Status { status, .. } => *status >= 500 || *status == 429,
        MarketDataError::MalformedPayload(_) => false,
    }
}

/// Parse the endpoint payload into ascending, de-duplicated bars, keeping the last `limit`.
pub fn parse_kline_payload(body: &str, limit: usize) -> Result<Vec<PriceBar>, MarketDataError> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let rows: Vec<SinaKline> = serde_json::from_str(trimmed)
        .map_err(|e| MarketDataError::MalformedPayload(e.to_string()))?;

    let mut bars = rows
        .iter()
        .map(to_price_bar)
        .collect::<Result<Vec<_>, _>>()?;

    bars.sort_by_key(|bar| bar.date);
    bars.dedup_by_key(|bar| bar.date);

    let skip = bars.len().saturating_sub(limit);
    Ok(bars.into_iter().skip(skip).collect())
}

fn to_price_bar(row: &SinaKline) -> Result<PriceBar, MarketDataError> {
    let day = row.day.get(..10).unwrap_or(&row.day);
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| MarketDataError::MalformedPayload(format!("invalid day '{}'", row.day)))?;

    Ok(PriceBar::new(
        date,
        parse_number("open", &row.open)?,
        parse_number("high", &row.high)?,
        parse_number("low", &row.low)?,
        parse_number("close", &row.close)?,
        parse_number("volume", &row.volume)?,
    ))
}

fn parse_number(field: &str, raw: &str) -> Result<f64, MarketDataError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketDataError::MalformedPayload(format!("invalid {} '{}'", field, raw)))
}
