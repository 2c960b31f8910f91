//! Application document: notification channels and LLM access.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub notification: NotificationConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub channels: BTreeMap<String, ChannelConfig>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        let mut channels = BTreeMap::new();
        channels.insert("console".to_string(), ChannelConfig::Console { enabled: true });
        Self {
            enabled: true,
            channels,
        }
    }
}

/// One delivery channel, selected by its `type` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ChannelConfig {
    Console {
        #[serde(default = "default_true")]
        enabled: bool,
    },
    Webhook {
        #[serde(default = "default_true")]
        enabled: bool,
        endpoints: Vec<WebhookEndpoint>,
    },
    Slack {
        #[serde(default = "default_true")]
        enabled: bool,
        token: String,
        default_channel: String,
    },
}

impl ChannelConfig {
    pub fn enabled(&self) -> bool {
        match self {
            ChannelConfig::Console { enabled }
            | ChannelConfig::Webhook { enabled, .. }
            | ChannelConfig::Slack { enabled, .. } => *enabled,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChannelConfig::Console { .. } => "console",
            ChannelConfig::Webhook { .. } => "webhook",
            ChannelConfig::Slack { .. } => "slack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEndpoint {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Falls back to `LLM_API_KEY` when empty.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_llm_base_url(),
            api_key: None,
            model: default_llm_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl LlmConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var("LLM_API_KEY").ok())
    }
}

fn default_true() -> bool {
    true
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_timeout() -> u64 {
    60
}

impl AppConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Load the document, falling back to console-only defaults when the file is absent.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "App config not found, using console notifications only");
            return Ok(Self::default());
        }
        Self::from_file(path)
    }
}
