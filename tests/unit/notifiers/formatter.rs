use crate::fixtures::strategy_with;
use chrono::NaiveDate;
use trendwatch::models::signal::{IndexResult, SignalResult, StructureReading, TimingReading, TrendType};
use trendwatch::notifiers::formatter::{
    format_date_marker, format_index_message, format_stock_message, is_buy_setup,
};

fn structure(trend: TrendType, pullback: bool, breakout: bool) -> StructureReading {
    StructureReading {
        price: 12.34,
        ma_short: 12.0,
        ma_long: 11.5,
        trend,
        pullback,
        breakout,
        resistance: 12.1,
    }
}

fn timing(rsi: f64, cci: Option<f64>) -> TimingReading {
    let rsi_in_range = (40.0..=70.0).contains(&rsi);
    let cci_in_range = cci.map(|v| (-100.0..=100.0).contains(&v)).unwrap_or(false);
    TimingReading {
        volume: 1_500_000.0,
        volume_ma: 1_000_000.0,
        volume_ok: true,
        rsi,
        rsi_in_range,
        cci,
        cci_in_range,
        timing_ok: rsi_in_range && cci_in_range,
    }
}

#[test]
fn date_marker_is_iso_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
    assert_eq!(format_date_marker(date), "=== 2024-03-08 ===");
}

#[test]
fn stock_message_describes_each_reading() {
    let config = strategy_with(20, 60, 20);
    let result = SignalResult::new(
        "sh600519",
        structure(TrendType::Uptrend, false, true),
        timing(55.0, Some(20.0)),
    )
    .with_name("Kweichow Moutai");

    let message = format_stock_message(&result, &config);
    assert!(message.starts_with("Kweichow Moutai 📈"));
    assert!(message.contains("Price: 12.34"));
    assert!(message.contains("MA20 / MA60: 12.00 / 11.50"));
    assert!(message.contains("Trend: UPTREND"));
    assert!(message.contains("Breakout: confirmed (resistance 12.10)"));
    assert!(message.contains("RSI: 55.0 (within band)"));
    assert!(message.contains("CCI: 20.0 (normal range)"));
    assert!(message.contains("trend-following entry signal"));
    assert!(message.contains("* Signals are not investment advice."));
}

#[test]
fn stock_message_handles_missing_cci() {
    let config = strategy_with(20, 60, 20);
    let result = SignalResult::new(
        "sz000001",
        structure(TrendType::Neutral, false, false),
        timing(75.0, None),
    );

    let message = format_stock_message(&result, &config);
    assert!(message.starts_with("sz000001 📊"));
    assert!(message.contains("CCI: n/a (no signal)"));
    assert!(message.contains("RSI: 75.0 (strong)"));
    assert!(message.contains("no entry, keep watching"));
}

#[test]
fn index_message_covers_every_trend() {
    let config = strategy_with(20, 60, 20);
    for (trend, emoji, outlook) in [
        (TrendType::Uptrend, "📈", "bullish structure"),
        (TrendType::Neutral, "📊", "range-bound"),
        (TrendType::Downtrend, "📉", "systemic drawdown"),
    ] {
        let result =
            IndexResult::new("sh000001", structure(trend, false, false)).with_name("SSE Composite");
        let message = format_index_message(&result, &config);
        assert!(message.starts_with(emoji), "{}", message);
        assert!(message.contains("Index: SSE Composite"));
        assert!(message.contains(trend.label()));
        assert!(message.contains(outlook), "{}", message);
    }
}

#[test]
fn buy_setup_needs_structure_and_oscillators() {
    let in_band = timing(55.0, Some(20.0));
    let breakout = SignalResult::new(
        "sh600000",
        structure(TrendType::Uptrend, false, true),
        in_band.clone(),
    );
    assert!(is_buy_setup(&breakout));

    let pullback = SignalResult::new(
        "sh600000",
        structure(TrendType::Neutral, true, false),
        in_band.clone(),
    );
    assert!(is_buy_setup(&pullback));

    let neutral_breakout = SignalResult::new(
        "sh600000",
        structure(TrendType::Neutral, false, true),
        in_band,
    );
    assert!(!is_buy_setup(&neutral_breakout));

    let hot = SignalResult::new(
        "sh600000",
        structure(TrendType::Uptrend, false, true),
        timing(85.0, Some(20.0)),
    );
    assert!(!is_buy_setup(&hot));
}
