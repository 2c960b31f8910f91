//! Evaluation output records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trend regime of the latest bar relative to its moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendType {
    Uptrend,
    Neutral,
    Downtrend,
}

impl TrendType {
    pub fn label(&self) -> &'static str {
        match self {
            TrendType::Uptrend => "UPTREND",
            TrendType::Neutral => "NEUTRAL",
            TrendType::Downtrend => "DOWNTREND",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            TrendType::Uptrend => "📈",
            TrendType::Neutral => "📊",
            TrendType::Downtrend => "📉",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TrendType::Uptrend => "bullish structure dominates",
            TrendType::Neutral => "range-bound consolidation",
            TrendType::Downtrend => "trend weakening, stay defensive",
        }
    }
}

impl fmt::Display for TrendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output of the structure signal. Numeric fields are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureReading {
    pub price: f64,
    pub ma_short: f64,
    pub ma_long: f64,
    pub trend: TrendType,
    pub pullback: bool,
    pub breakout: bool,
    pub resistance: f64,
}

/// Output of the timing signal. Numeric fields are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReading {
    pub volume: f64,
    pub volume_ma: f64,
    pub volume_ok: bool,
    pub rsi: f64,
    pub rsi_in_range: bool,
    /// `None` means the CCI had no signal (flat window).
    pub cci: Option<f64>,
    pub cci_in_range: bool,
    pub timing_ok: bool,
}

/// Merged stock evaluation, serialized as one flat mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub structure: StructureReading,
    #[serde(flatten)]
    pub timing: TimingReading,
}

impl SignalResult {
    pub fn new(symbol: impl Into<String>, structure: StructureReading, timing: TimingReading) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            structure,
            timing,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display name, falling back to the symbol.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Structure-only evaluation used for market indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResult {
    pub symbol: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub structure: StructureReading,
}

impl IndexResult {
    pub fn new(symbol: impl Into<String>, structure: StructureReading) -> Self {
        Self {
            symbol: symbol.into(),
            name: None,
            structure,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.symbol)
    }
}

/// Result of fetching and evaluating one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome<T> {
    /// The provider returned an empty series; no signal was computed.
    NoData { symbol: String },
    Evaluated(T),
}

impl<T> SignalOutcome<T> {
    pub fn evaluated(self) -> Option<T> {
        match self {
            SignalOutcome::Evaluated(result) => Some(result),
            SignalOutcome::NoData { .. } => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, SignalOutcome::NoData { .. })
    }
}
