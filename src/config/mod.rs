//! Process configuration
//!
//! Runtime settings come from the environment (optionally seeded from `.env`
//! through `dotenvy` by the binaries). Channel and LLM settings live in the
//! application YAML document, see [`app`].

pub mod app;

pub use app::{AppConfig, ChannelConfig, LlmConfig, NotificationConfig, WebhookEndpoint};

use crate::error::ConfigError;
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_MONITOR_CRON: &str = "0 0 14 * * Mon-Fri";
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://money.finance.sina.com.cn";

/// Deployment environment name (`APP_ENV`), defaulting to `sandbox`.
pub fn get_environment() -> String {
    env::var("APP_ENV").unwrap_or_else(|_| "sandbox".to_string())
}

/// Settings shared by the binaries.
#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub strategy_config_path: PathBuf,
    pub app_config_path: PathBuf,
    pub watchlist_path: PathBuf,
    pub index_pool_path: PathBuf,
    pub monitor_delay: Duration,
    pub monitor_cron: String,
    pub monitor_utc_offset_hours: i32,
    pub market_data_base_url: String,
    pub market_data_bars: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: 8080,
            strategy_config_path: PathBuf::from("./conf/strategy.yaml"),
            app_config_path: PathBuf::from("./conf/config.yaml"),
            watchlist_path: PathBuf::from("./conf/watchlist.json"),
            index_pool_path: PathBuf::from("./conf/index_pool.json"),
            monitor_delay: Duration::from_millis(1000),
            monitor_cron: DEFAULT_MONITOR_CRON.to_string(),
            monitor_utc_offset_hours: 8,
            market_data_base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            market_data_bars: 250,
        }
    }
}

impl Settings {
    /// Read settings from the environment, keeping defaults for unset keys.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            strategy_config_path: path_var("STRATEGY_CONFIG_PATH", defaults.strategy_config_path),
            app_config_path: path_var("APP_CONFIG_PATH", defaults.app_config_path),
            watchlist_path: path_var("WATCHLIST_PATH", defaults.watchlist_path),
            index_pool_path: path_var("INDEX_POOL_PATH", defaults.index_pool_path),
            monitor_delay: Duration::from_millis(parse_var(
                "MONITOR_DELAY_MS",
                defaults.monitor_delay.as_millis() as u64,
            )?),
            monitor_cron: env::var("MONITOR_CRON").unwrap_or(defaults.monitor_cron),
            monitor_utc_offset_hours: parse_var(
                "MONITOR_UTC_OFFSET_HOURS",
                defaults.monitor_utc_offset_hours,
            )?,
            market_data_base_url: env::var("MARKET_DATA_BASE_URL")
                .unwrap_or(defaults.market_data_base_url),
            market_data_bars: parse_var("MARKET_DATA_BARS", defaults.market_data_bars)?,
        })
    }

    /// Timezone the monitor cron expression is evaluated in.
    pub fn monitor_timezone(&self) -> Result<FixedOffset, ConfigError> {
        self.monitor_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Environment {
                key: "MONITOR_UTC_OFFSET_HOURS".to_string(),
                value: self.monitor_utc_offset_hours.to_string(),
            })
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Environment {
            key: key.to_string(),
            value: raw,
        }),
        Err(_) => Ok(default),
    }
}

fn path_var(key: &str, default: PathBuf) -> PathBuf {
    env::var(key).map(PathBuf::from).unwrap_or(default)
}
