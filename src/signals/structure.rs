//! Structure signal: trend regime, pullback and breakout.

use crate::common::math::round2;
use crate::error::SignalError;
use crate::indicators::structure::{calculate_resistance, is_breakout};
use crate::indicators::trend::calculate_sma_pair;
use crate::models::indicators::PriceBar;
use crate::models::signal::{StructureReading, TrendType};
use crate::models::strategy::StrategyConfig;
use std::sync::Arc;

pub struct StructureSignal {
    config: Arc<StrategyConfig>,
}

impl StructureSignal {
    pub fn new(config: Arc<StrategyConfig>) -> Self {
        Self { config }
    }

    /// Bars needed for the long MA and for a resistance window before the latest bar.
    pub fn required_bars(&self) -> usize {
        let trend = &self.config.trend;
        trend
            .moving_averages
            .long
            .max(trend.breakout.resistance_window.saturating_add(1))
    }

    pub fn evaluate(&self, bars: &[PriceBar]) -> Result<StructureReading, SignalError> {
        let required = self.required_bars();
        let insufficient = || SignalError::InsufficientData {
            required,
            available: bars.len(),
        };
        if bars.len() < required {
            return Err(insufficient());
        }

        let trend_config = &self.config.trend;
        let (short, long) = calculate_sma_pair(
            bars,
            trend_config.moving_averages.short,
            trend_config.moving_averages.long,
        )
        .ok_or_else(insufficient)?;
        let resistance = calculate_resistance(bars, trend_config.breakout.resistance_window)
            .ok_or_else(insufficient)?;

        let price = bars[bars.len() - 1].close;
        let previous_close = bars[bars.len() - 2].close;

        let trend = classify_trend(price, short.value, long.value);
        let pullback = trend_config.pullback.enabled
            && is_pullback(price, short.value, long.value, trend_config.pullback.threshold);
        let breakout = is_breakout(
            previous_close,
            price,
            resistance.value,
            trend_config.breakout.buffer,
        );

        Ok(StructureReading {
            price: round2(price),
            ma_short: round2(short.value),
            ma_long: round2(long.value),
            trend,
            pullback,
            breakout,
            resistance: round2(resistance.value),
        })
    }
}

/// First match wins; ties fall through to the weaker regime.
pub fn classify_trend(price: f64, ma_short: f64, ma_long: f64) -> TrendType {
    if price > ma_short && ma_short > ma_long {
        TrendType::Uptrend
    } else if price > ma_long {
        TrendType::Neutral
    } else {
        TrendType::Downtrend
    }
}

/// Shallow dip under the short MA while the averages remain in uptrend order
/// and price holds above the long MA.
///
/// "Within an uptrend" is judged by MA order alone (`ma_short > ma_long`):
/// a price under the short MA can never be classified `Uptrend`, so the regime
/// label would exclude every pullback.
pub fn is_pullback(price: f64, ma_short: f64, ma_long: f64, threshold: f64) -> bool {
    ma_short > ma_long
        && price < ma_short
        && price > ma_long
        && (ma_short - price) / ma_short <= threshold
}
