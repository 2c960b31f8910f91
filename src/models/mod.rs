//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;
pub mod strategy;

pub use indicators::{
    CciIndicator, MovingAverage, PriceBar, ResistanceLevel, RsiIndicator, VolumeIndicator,
};
pub use signal::{
    IndexResult, SignalOutcome, SignalResult, StructureReading, TimingReading, TrendType,
};
pub use strategy::{
    BreakoutConfig, MovingAverageConfig, PullbackConfig, RangeIndicatorConfig, StrategyConfig,
    StrategyMeta, TrendConfig, VolumeConfig,
};
