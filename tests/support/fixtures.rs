//! Shared builders for price series and strategies
#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use std::sync::Arc;
use trendwatch::models::indicators::PriceBar;
use trendwatch::models::strategy::StrategyConfig;

pub const DEFAULT_VOLUME: f64 = 1_000_000.0;

/// Strategy with MA20/MA60, 20-day resistance and the usual oscillator bands.
pub fn default_strategy() -> Arc<StrategyConfig> {
    Arc::new(strategy_with(20, 60, 20))
}

pub fn strategy_with(short: usize, long: usize, resistance_window: usize) -> StrategyConfig {
    StrategyConfig::from_yaml(&strategy_yaml(short, long, resistance_window))
        .expect("valid test strategy")
}

pub fn strategy_yaml(short: usize, long: usize, resistance_window: usize) -> String {
    format!(
        r#"
strategy:
  id: trend_following
  name: Test trend
  version: "1.0"
trend:
  moving_averages:
    short: {short}
    long: {long}
  pullback:
    enabled: true
    threshold: 0.03
  breakout:
    resistance_window: {resistance_window}
    buffer: 0.005
volume:
  ma_window: 20
  min_ratio: 1.0
rsi:
  min: 40
  max: 70
cci:
  min: -100
  max: 100
risk_disclaimer:
  - Signals are not investment advice.
"#
    )
}

pub fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 2).expect("valid date")
}

/// Daily bars with constant volume; high/low straddle the close by 1%.
pub fn bars_from_closes(closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| bar(i, close, DEFAULT_VOLUME))
        .collect()
}

pub fn bar(offset: usize, close: f64, volume: f64) -> PriceBar {
    PriceBar::new(
        start_date() + Duration::days(offset as i64),
        close,
        close * 1.01,
        close * 0.99,
        close,
        volume,
    )
}

/// `count` closes evenly spaced from `first` to `last` inclusive.
pub fn linear_closes(count: usize, first: f64, last: f64) -> Vec<f64> {
    let step = (last - first) / (count - 1) as f64;
    (0..count).map(|i| first + step * i as f64).collect()
}

/// Rising then gently sagging series that keeps RSI and CCI inside their bands.
pub fn wavy_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| 10.0 + i as f64 * 0.05 + if i % 2 == 0 { 0.2 } else { -0.2 })
        .collect()
}
