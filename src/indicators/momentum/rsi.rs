//! RSI (Relative Strength Index) indicator

use crate::models::indicators::{PriceBar, RsiIndicator};

/// Calculate RSI over the last `period` close-to-close changes
///
/// RSI = 100 - (100 / (1 + RS))
/// RS = Average Gain / Average Loss
///
/// Averages are plain trailing means, not Wilder smoothing. When the window
/// holds no losses the value saturates at 100.
pub fn calculate_rsi(bars: &[PriceBar], period: usize) -> Option<RsiIndicator> {
    if period == 0 || bars.len() <= period {
        return None;
    }

    let window = &bars[bars.len() - (period + 1)..];
    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;

    for pair in window.windows(2) {
        let change = pair[1].close - pair[0].close;
        if change > 0.0 {
            gain_sum += change;
        } else {
            loss_sum += -change;
        }
    }

    let avg_gain = gain_sum / period as f64;
    let avg_loss = loss_sum / period as f64;

    if avg_loss == 0.0 {
        return Some(RsiIndicator {
            value: 100.0,
            period,
        });
    }

    let rs = avg_gain / avg_loss;
    let rsi = 100.0 - (100.0 / (1.0 + rs));

    Some(RsiIndicator {
        value: rsi.clamp(0.0, 100.0),
        period,
    })
}

/// Calculate RSI with default period (14)
pub fn calculate_rsi_default(bars: &[PriceBar]) -> Option<RsiIndicator> {
    calculate_rsi(bars, 14)
}
