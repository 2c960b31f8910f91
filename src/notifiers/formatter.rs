//! Plain-text alert formatting for chat channels.

use crate::models::signal::{IndexResult, SignalResult, TrendType};
use crate::models::strategy::StrategyConfig;
use chrono::NaiveDate;

const SEPARATOR: &str = "━━━━━━━━━━━━━━━━";

/// Header sent once at the start of each daily run.
pub fn format_date_marker(date: NaiveDate) -> String {
    format!("=== {} ===", date.format("%Y-%m-%d"))
}

pub fn format_stock_message(result: &SignalResult, config: &StrategyConfig) -> String {
    let s = &result.structure;
    let t = &result.timing;
    let ma = &config.trend.moving_averages;

    let pullback_desc = if s.pullback { "formed" } else { "not formed" };
    let breakout_desc = if s.breakout { "confirmed" } else { "not confirmed" };

    let rsi_desc = if t.rsi_in_range {
        "within band"
    } else if t.rsi < config.rsi.min {
        "weak"
    } else {
        "strong"
    };

    let (cci_value, cci_desc) = match t.cci {
        None => ("n/a".to_string(), "no signal"),
        Some(cci) if t.cci_in_range => (format!("{:.1}", cci), "normal range"),
        Some(cci) if cci < config.cci.min => (format!("{:.1}", cci), "oversold"),
        Some(cci) => (format!("{:.1}", cci), "overheated"),
    };

    let volume_desc = if t.volume_ok { "confirmed" } else { "below threshold" };

    let verdict = if is_buy_setup(result) {
        "Trend and timing conditions met: trend-following entry signal."
    } else {
        "Trend, structure or timing conditions not met: no entry, keep watching."
    };

    let mut message = format!(
        "{name} {emoji}\n\
         Price: {price:.2}\n\
         MA{short} / MA{long}: {ma_short:.2} / {ma_long:.2}\n\
         Trend: {trend} ({trend_desc})\n\n\
         Structure:\n\
         - Pullback: {pullback_desc}\n\
         - Breakout: {breakout_desc} (resistance {resistance:.2})\n\n\
         Timing (soft filters):\n\
         - Volume: {volume:.0} vs MA {volume_ma:.0} ({volume_desc})\n\
         - RSI: {rsi:.1} ({rsi_desc})\n\
         - CCI: {cci_value} ({cci_desc})\n\n\
         Verdict:\n\
         {verdict}\n",
        name = result.display_name(),
        emoji = s.trend.emoji(),
        price = s.price,
        short = ma.short,
        long = ma.long,
        ma_short = s.ma_short,
        ma_long = s.ma_long,
        trend = s.trend,
        trend_desc = s.trend.description(),
        resistance = s.resistance,
        volume = t.volume,
        volume_ma = t.volume_ma,
        rsi = t.rsi,
    );

    for line in &config.risk_disclaimer {
        message.push_str(&format!("\n* {}", line));
    }
    message.push_str(&format!("\n{}", SEPARATOR));
    message
}

pub fn format_index_message(result: &IndexResult, config: &StrategyConfig) -> String {
    let s = &result.structure;
    let ma = &config.trend.moving_averages;

    let pullback_desc = if s.pullback {
        "in a pullback structure"
    } else {
        "not in a pullback structure"
    };
    let breakout_desc = if s.breakout {
        "breakout confirmed"
    } else {
        "no valid breakout"
    };

    let outlook = match s.trend {
        TrendType::Uptrend => "The index holds a bullish structure, supportive of trend strategies.",
        TrendType::Neutral => {
            "The index is range-bound with mixed conviction; limited support for single-stock trend setups."
        }
        TrendType::Downtrend => {
            "The index trend is weak and risk appetite is falling; watch for systemic drawdown."
        }
    };

    format!(
        "{emoji} Index trend monitor\n\n\
         Index: {name}\n\
         Level: {price:.2}\n\
         MA{short} / MA{long}: {ma_short:.2} / {ma_long:.2}\n\
         Trend: {trend} ({trend_desc})\n\n\
         Structure:\n\
         - {pullback_desc}\n\
         - {breakout_desc}\n\n\
         Outlook:\n\
         {outlook}\n",
        emoji = s.trend.emoji(),
        name = result.display_name(),
        price = s.price,
        short = ma.short,
        long = ma.long,
        ma_short = s.ma_short,
        ma_long = s.ma_long,
        trend = s.trend,
        trend_desc = s.trend.description(),
    )
}

/// A breakout in an uptrend, or a pullback (which already implies rising
/// averages), with both oscillators in band.
pub fn is_buy_setup(result: &SignalResult) -> bool {
    let s = &result.structure;
    let t = &result.timing;
    let structural = (s.trend == TrendType::Uptrend && s.breakout) || s.pullback;
    structural && t.rsi_in_range && t.cci_in_range
}
