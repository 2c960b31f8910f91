//! Timing signal: RSI, CCI and volume confirmation as soft entry filters.

use crate::common::math::round2;
use crate::error::SignalError;
use crate::indicators::momentum::{calculate_cci, calculate_rsi};
use crate::indicators::volume::{calculate_volume_ma, is_volume_confirmed};
use crate::models::indicators::PriceBar;
use crate::models::signal::TimingReading;
use crate::models::strategy::StrategyConfig;
use std::sync::Arc;

pub struct TimingSignal {
    config: Arc<StrategyConfig>,
}

impl TimingSignal {
    pub fn new(config: Arc<StrategyConfig>) -> Self {
        Self { config }
    }

    pub fn required_bars(&self) -> usize {
        self.config
            .volume
            .ma_window
            .max(self.config.rsi_period().saturating_add(1))
            .max(self.config.cci_period())
    }

    pub fn evaluate(&self, bars: &[PriceBar]) -> Result<TimingReading, SignalError> {
        let required = self.required_bars();
        let insufficient = || SignalError::InsufficientData {
            required,
            available: bars.len(),
        };
        if bars.len() < required {
            return Err(insufficient());
        }

        let volume = calculate_volume_ma(bars, self.config.volume.ma_window)
            .ok_or_else(insufficient)?;
        let rsi = calculate_rsi(bars, self.config.rsi_period()).ok_or_else(insufficient)?;
        let cci = calculate_cci(bars, self.config.cci_period()).ok_or_else(insufficient)?;

        let volume_ok = is_volume_confirmed(&volume, self.config.volume.min_ratio);
        let rsi_in_range = self.config.rsi.contains(rsi.value);
        let cci_in_range = cci
            .value
            .map(|value| self.config.cci.contains(value))
            .unwrap_or(false);

        Ok(TimingReading {
            volume: round2(volume.volume),
            volume_ma: round2(volume.volume_ma),
            volume_ok,
            rsi: round2(rsi.value),
            rsi_in_range,
            cci: cci.value.map(round2),
            cci_in_range,
            timing_ok: volume_ok && rsi_in_range && cci_in_range,
        })
    }
}
