use crate::fixtures::{
    bars_from_closes, default_strategy, linear_closes, strategy_with, wavy_closes,
};
use std::sync::Arc;
use trendwatch::error::{MarketDataError, SignalError};
use trendwatch::models::signal::{SignalOutcome, TrendType};
use trendwatch::services::market_data::StaticMarketDataProvider;
use trendwatch::signals::SignalEngine;

fn engine_with(provider: StaticMarketDataProvider) -> SignalEngine {
    SignalEngine::new(default_strategy(), Arc::new(provider))
}

#[tokio::test]
async fn empty_series_is_no_data() {
    let engine = engine_with(StaticMarketDataProvider::new());
    let outcome = engine.evaluate("sh600000").await.unwrap();
    assert!(outcome.is_no_data());
    assert_eq!(
        outcome,
        SignalOutcome::NoData {
            symbol: "sh600000".to_string()
        }
    );
}

#[tokio::test]
async fn evaluates_structure_and_timing_over_same_series() {
    let bars = bars_from_closes(&wavy_closes(80));
    let engine = engine_with(StaticMarketDataProvider::new().with_series("sz000001", bars));

    let result = engine
        .evaluate("sz000001")
        .await
        .unwrap()
        .evaluated()
        .unwrap();

    assert_eq!(result.symbol, "sz000001");
    assert_eq!(result.name, None);
    assert_eq!(result.structure.trend, TrendType::Uptrend);
    assert!(result.timing.timing_ok);
}

#[tokio::test]
async fn short_series_is_insufficient_data() {
    let bars = bars_from_closes(&linear_closes(30, 10.0, 12.0));
    let engine = engine_with(StaticMarketDataProvider::new().with_series("sh600000", bars));

    let err = engine.evaluate("sh600000").await.unwrap_err();
    assert!(matches!(
        err,
        SignalError::InsufficientData {
            required: 60,
            available: 30
        }
    ));
}

#[tokio::test]
async fn provider_failure_is_upstream_error() {
    let engine = engine_with(StaticMarketDataProvider::new().with_failure("sh600000", "boom"));
    let err = engine.evaluate("sh600000").await.unwrap_err();
    assert!(matches!(
        err,
        SignalError::Upstream(MarketDataError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn index_evaluation_runs_structure_only() {
    // flat volume and closes would fail timing; structure alone still evaluates
    let bars = bars_from_closes(&[10.0; 60]);
    let engine = engine_with(StaticMarketDataProvider::new().with_series("sh000001", bars));

    let result = engine
        .evaluate_index("sh000001")
        .await
        .unwrap()
        .evaluated()
        .unwrap();
    assert_eq!(result.symbol, "sh000001");
    assert_eq!(result.structure.trend, TrendType::Downtrend);
}

#[test]
fn unordered_series_is_rejected() {
    let engine = engine_with(StaticMarketDataProvider::new());
    let mut bars = bars_from_closes(&wavy_closes(80));
    bars.swap(40, 41);

    let err = engine.evaluate_series("sh600000", &bars).unwrap_err();
    assert!(matches!(err, SignalError::UnorderedSeries { index: 41 }));
}

#[test]
fn duplicate_dates_are_rejected() {
    let engine = engine_with(StaticMarketDataProvider::new());
    let mut bars = bars_from_closes(&wavy_closes(80));
    bars[10].date = bars[9].date;

    assert!(matches!(
        engine.evaluate_index_series("sh000001", &bars),
        Err(SignalError::UnorderedSeries { index: 10 })
    ));
}

#[test]
fn bar_limit_never_drops_below_requirement() {
    let engine = engine_with(StaticMarketDataProvider::new()).with_bar_limit(10);
    assert_eq!(engine.required_bars(), 60);
    assert_eq!(engine.bar_limit(), 60);
}

#[test]
fn default_bar_limit_covers_long_averages() {
    let engine = engine_with(StaticMarketDataProvider::new());
    assert_eq!(engine.bar_limit(), 250);

    let engine = SignalEngine::new(
        Arc::new(strategy_with(20, 300, 20)),
        Arc::new(StaticMarketDataProvider::new()),
    );
    assert_eq!(engine.required_bars(), 300);
    assert_eq!(engine.bar_limit(), 300);
}

#[test]
fn result_serializes_as_flat_mapping() {
    let engine = engine_with(StaticMarketDataProvider::new());
    let result = engine
        .evaluate_series("sz000001", &bars_from_closes(&wavy_closes(80)))
        .unwrap()
        .with_name("Ping An Bank");

    let value = serde_json::to_value(&result).unwrap();
    for key in [
        "symbol",
        "name",
        "price",
        "ma_short",
        "ma_long",
        "trend",
        "pullback",
        "breakout",
        "resistance",
        "volume",
        "volume_ma",
        "volume_ok",
        "rsi",
        "rsi_in_range",
        "cci",
        "cci_in_range",
        "timing_ok",
    ] {
        assert!(value.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(value["trend"], "UPTREND");
    assert_eq!(value["name"], "Ping An Bank");
}
