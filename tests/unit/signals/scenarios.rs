//! End-to-end scenarios over synthetic daily series

use crate::fixtures::{bars_from_closes, linear_closes, strategy_with, wavy_closes};
use std::sync::Arc;
use trendwatch::models::signal::TrendType;
use trendwatch::notifiers::formatter::is_buy_setup;
use trendwatch::services::market_data::StaticMarketDataProvider;
use trendwatch::signals::SignalEngine;

#[test]
fn linear_climb_with_short_averages() {
    let closes = linear_closes(90, 10.0, 19.0);
    let bars = bars_from_closes(&closes);
    let engine = SignalEngine::new(
        Arc::new(strategy_with(5, 10, 20)),
        Arc::new(StaticMarketDataProvider::new()),
    );

    let result = engine.evaluate_series("sh600000", &bars).unwrap();

    assert_eq!(result.structure.trend, TrendType::Uptrend);
    assert!(!result.structure.pullback);

    let last = closes[closes.len() - 1];
    let prior_max = closes[closes.len() - 21..closes.len() - 1]
        .iter()
        .copied()
        .fold(f64::MIN, f64::max);
    assert_eq!(result.structure.breakout, last > prior_max * 1.005);
    assert_eq!(result.structure.price, 19.0);
    assert_eq!(result.timing.rsi, 100.0);
    assert!(!is_buy_setup(&result));
}

#[test]
fn breakout_with_oscillators_in_band_is_buy_setup() {
    let mut closes = wavy_closes(80);
    // last bar clears the 20-day high while the oscillators stay moderate
    let last = closes[79];
    closes[79] = last + 0.5;
    let bars = bars_from_closes(&closes);
    let engine = SignalEngine::new(
        Arc::new(strategy_with(20, 60, 20)),
        Arc::new(StaticMarketDataProvider::new()),
    );

    let result = engine.evaluate_series("sz000001", &bars).unwrap();
    assert_eq!(result.structure.trend, TrendType::Uptrend);
    assert!(result.structure.breakout);
    assert_eq!(
        is_buy_setup(&result),
        result.timing.rsi_in_range && result.timing.cci_in_range
    );
}
