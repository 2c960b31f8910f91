//! Error taxonomy shared across the crate.

use thiserror::Error;

/// Failures while loading or validating configuration. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid strategy configuration: {0}")]
    Validation(String),

    #[error("Invalid environment setting {key}: {value}")]
    Environment { key: String, value: String },
}

/// Failures raised by a market data provider.
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Provider returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Per-symbol evaluation failures. Recoverable at batch level.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Insufficient data: {required} bars required, {available} available")]
    InsufficientData { required: usize, available: usize },

    #[error("Upstream data error: {0}")]
    Upstream(#[from] MarketDataError),

    #[error("Price series is not strictly ascending by date at index {index}")]
    UnorderedSeries { index: usize },
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Channel '{channel}' rejected message: {reason}")]
    Rejected { channel: String, reason: String },

    #[error("{failed} of {attempted} channels failed")]
    Partial { failed: usize, attempted: usize },
}

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("LLM explanation is disabled")]
    Disabled,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response had no content")]
    EmptyResponse,

    #[error("Failed to serialize prompt input: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum WatchlistError {
    #[error("Failed to access watchlist {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed watchlist {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid stock code: {0}")]
    InvalidCode(String),
}
