//! Resistance level and breakout detection

use crate::common::math;
use crate::models::indicators::{PriceBar, ResistanceLevel};

/// Highest close over the `window` bars immediately preceding the latest bar
///
/// Needs `window + 1` bars. The latest bar is the candidate breakout bar and is
/// therefore kept out of its own reference level.
pub fn calculate_resistance(bars: &[PriceBar], window: usize) -> Option<ResistanceLevel> {
    if window == 0 || bars.len() <= window {
        return None;
    }

    let prior = &bars[..bars.len() - 1];
    let closes: Vec<f64> = prior[prior.len() - window..].iter().map(|b| b.close).collect();
    let value = math::trailing_max(&closes, window)?;

    Some(ResistanceLevel { value, window })
}

/// Fresh crossing: the previous close sat at or under resistance and the latest
/// close clears it by more than `buffer`
pub fn is_breakout(previous_close: f64, close: f64, resistance: f64, buffer: f64) -> bool {
    previous_close <= resistance && close > resistance * (1.0 + buffer)
}
