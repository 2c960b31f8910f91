//! Volume indicators

use crate::common::math;
use crate::models::indicators::{PriceBar, VolumeIndicator};

/// Latest volume alongside its trailing average over `period` bars
pub fn calculate_volume_ma(bars: &[PriceBar], period: usize) -> Option<VolumeIndicator> {
    if period == 0 || bars.len() < period {
        return None;
    }

    let volumes: Vec<f64> = bars[bars.len() - period..].iter().map(|b| b.volume).collect();
    let volume_ma = math::sma(&volumes, period)?;

    Some(VolumeIndicator {
        volume: bars.last()?.volume,
        volume_ma,
        volume_ma_period: period,
    })
}

/// Whether the latest volume reaches `min_ratio` times its average (inclusive)
pub fn is_volume_confirmed(indicator: &VolumeIndicator, min_ratio: f64) -> bool {
    indicator.volume >= indicator.volume_ma * min_ratio
}
