//! Strategy parameter model
//!
//! Mirrors the declarative strategy document one-to-one. A `StrategyConfig`
//! obtained through [`StrategyConfig::from_yaml`] or [`StrategyConfig::from_file`]
//! has already been validated and is meant to be shared read-only.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_RSI_PERIOD: usize = 14;
const DEFAULT_CCI_PERIOD: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default)]
    pub strategy: StrategyMeta,
    pub trend: TrendConfig,
    pub volume: VolumeConfig,
    pub rsi: RangeIndicatorConfig,
    pub cci: RangeIndicatorConfig,
    #[serde(default)]
    pub risk_disclaimer: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyMeta {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
}

impl Default for StrategyMeta {
    fn default() -> Self {
        Self {
            id: "trend_following".to_string(),
            name: "Trend following".to_string(),
            version: "1.0".to_string(),
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    pub moving_averages: MovingAverageConfig,
    pub pullback: PullbackConfig,
    pub breakout: BreakoutConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageConfig {
    pub short: usize,
    pub long: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PullbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakoutConfig {
    pub resistance_window: usize,
    pub buffer: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeConfig {
    pub ma_window: usize,
    pub min_ratio: f64,
}

/// Acceptable band for an oscillator, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeIndicatorConfig {
    pub min: f64,
    pub max: f64,
    /// Lookback period; when absent the indicator's conventional default applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<usize>,
}

impl RangeIndicatorConfig {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

fn default_true() -> bool {
    true
}

impl StrategyConfig {
    /// Load and validate a strategy document from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a strategy document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: StrategyConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn rsi_period(&self) -> usize {
        self.rsi.period.unwrap_or(DEFAULT_RSI_PERIOD)
    }

    pub fn cci_period(&self) -> usize {
        self.cci.period.unwrap_or(DEFAULT_CCI_PERIOD)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ma = &self.trend.moving_averages;
        positive("trend.moving_averages.short", ma.short)?;
        positive("trend.moving_averages.long", ma.long)?;
        if ma.short >= ma.long {
            return Err(ConfigError::Validation(format!(
                "trend.moving_averages.short ({}) must be less than long ({})",
                ma.short, ma.long
            )));
        }

        let threshold = self.trend.pullback.threshold;
        non_negative("trend.pullback.threshold", threshold)?;
        if threshold <= 0.0 || threshold >= 1.0 {
            return Err(ConfigError::Validation(format!(
                "trend.pullback.threshold must be within (0, 1), got {}",
                threshold
            )));
        }

        positive(
            "trend.breakout.resistance_window",
            self.trend.breakout.resistance_window,
        )?;
        non_negative("trend.breakout.buffer", self.trend.breakout.buffer)?;

        positive("volume.ma_window", self.volume.ma_window)?;
        non_negative("volume.min_ratio", self.volume.min_ratio)?;

        band("rsi", &self.rsi)?;
        band("cci", &self.cci)?;
        positive("rsi.period", self.rsi_period())?;
        positive("cci.period", self.cci_period())?;

        Ok(())
    }

    /// Plain-language summary of the active parameters.
    pub fn summary(&self) -> String {
        let ma = &self.trend.moving_averages;
        let mut lines = vec![
            format!(
                "{} (v{}): {}",
                self.strategy.name, self.strategy.version, self.strategy.description
            ),
            format!(
                "Trend: uptrend when price > MA{} > MA{}",
                ma.short, ma.long
            ),
        ];
        if self.trend.pullback.enabled {
            lines.push(format!(
                "Pullback: price between MA{} and MA{}, at most {:.1}% below MA{}",
                ma.long,
                ma.short,
                self.trend.pullback.threshold * 100.0,
                ma.short
            ));
        } else {
            lines.push("Pullback: disabled".to_string());
        }
        lines.push(format!(
            "Breakout: close above the {}-day high by more than {:.2}%",
            self.trend.breakout.resistance_window,
            self.trend.breakout.buffer * 100.0
        ));
        lines.push(format!(
            "Volume: at least {:.2}x the {}-day average",
            self.volume.min_ratio, self.volume.ma_window
        ));
        lines.push(format!(
            "RSI({}): {} to {}",
            self.rsi_period(),
            self.rsi.min,
            self.rsi.max
        ));
        lines.push(format!(
            "CCI({}): {} to {}",
            self.cci_period(),
            self.cci.min,
            self.cci.max
        ));
        lines.join("\n")
    }
}

fn positive(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!("{} must be positive", field)));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn band(field: &str, range: &RangeIndicatorConfig) -> Result<(), ConfigError> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(ConfigError::Validation(format!(
            "{} bounds must be finite",
            field
        )));
    }
    if range.min > range.max {
        return Err(ConfigError::Validation(format!(
            "{}.min ({}) must not exceed {}.max ({})",
            field, range.min, field, range.max
        )));
    }
    Ok(())
}
