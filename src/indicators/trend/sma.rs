//! SMA (Simple Moving Average) indicator

use crate::common::math;
use crate::models::indicators::{MovingAverage, PriceBar};

/// Calculate the SMA of closing prices over the last `period` bars
pub fn calculate_sma(bars: &[PriceBar], period: usize) -> Option<MovingAverage> {
    if period == 0 || bars.len() < period {
        return None;
    }

    let closes: Vec<f64> = bars[bars.len() - period..].iter().map(|b| b.close).collect();
    let value = math::sma(&closes, period)?;

    Some(MovingAverage { value, period })
}

/// Calculate a short/long SMA pair at once
pub fn calculate_sma_pair(
    bars: &[PriceBar],
    short_period: usize,
    long_period: usize,
) -> Option<(MovingAverage, MovingAverage)> {
    Some((
        calculate_sma(bars, short_period)?,
        calculate_sma(bars, long_period)?,
    ))
}
