//! CCI (Commodity Channel Index) indicator

use crate::common::math;
use crate::models::indicators::{CciIndicator, PriceBar};

const CCI_CONSTANT: f64 = 0.015;

/// Calculate CCI over the last `period` bars
///
/// TP  = (high + low + close) / 3
/// CCI = (TP - SMA(TP)) / (0.015 * mean absolute deviation of TP)
///
/// A flat window has zero deviation; the reading then carries no value.
pub fn calculate_cci(bars: &[PriceBar], period: usize) -> Option<CciIndicator> {
    if period == 0 || bars.len() < period {
        return None;
    }

    let typical: Vec<f64> = bars[bars.len() - period..]
        .iter()
        .map(PriceBar::typical_price)
        .collect();
    let tp_sma = math::sma(&typical, period)?;
    let mean_deviation = math::mean_absolute_deviation(&typical, period)?;
    let current = *typical.last()?;

    let value = if mean_deviation == 0.0 {
        None
    } else {
        Some((current - tp_sma) / (CCI_CONSTANT * mean_deviation))
    };

    Some(CciIndicator { value, period })
}

/// Calculate CCI with default period (20)
pub fn calculate_cci_default(bars: &[PriceBar]) -> Option<CciIndicator> {
    calculate_cci(bars, 20)
}
