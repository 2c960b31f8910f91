//! Fan-out of one message to every enabled channel.

use crate::config::{ChannelConfig, NotificationConfig};
use crate::error::NotifyError;
use crate::notifiers::{ConsoleSender, NotificationSender, SlackSender, WebhookSender};
use tracing::{debug, error};

pub struct NotificationManager {
    enabled: bool,
    senders: Vec<Box<dyn NotificationSender>>,
}

impl NotificationManager {
    /// Build senders for the enabled channels of `config`.
    pub fn from_config(config: &NotificationConfig, client: reqwest::Client) -> Self {
        let senders = config
            .channels
            .iter()
            .filter(|(_, channel)| channel.enabled())
            .map(|(name, channel)| -> Box<dyn NotificationSender> {
                match channel {
                    ChannelConfig::Console { .. } => Box::new(ConsoleSender::new(name.clone())),
                    ChannelConfig::Webhook { endpoints, .. } => Box::new(WebhookSender::new(
                        name.clone(),
                        client.clone(),
                        endpoints.clone(),
                    )),
                    ChannelConfig::Slack {
                        token,
                        default_channel,
                        ..
                    } => Box::new(SlackSender::new(
                        name.clone(),
                        client.clone(),
                        token.clone(),
                        default_channel.clone(),
                    )),
                }
            })
            .collect();

        Self {
            enabled: config.enabled,
            senders,
        }
    }

    pub fn from_senders(senders: Vec<Box<dyn NotificationSender>>) -> Self {
        Self {
            enabled: true,
            senders,
        }
    }

    /// A manager that drops every message.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            senders: Vec::new(),
        }
    }

    pub fn channel_count(&self) -> usize {
        self.senders.len()
    }

    /// Deliver to every channel. Returns the number of successful deliveries;
    /// a failing channel does not stop the others but makes the call an error.
    pub async fn notify(&self, message: &str) -> Result<usize, NotifyError> {
        if !self.enabled {
            debug!("Notifications disabled, dropping message");
            return Ok(0);
        }

        let mut delivered = 0;
        let mut failed = 0;
        for sender in &self.senders {
            match sender.send(message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    failed += 1;
                    error!(channel = %sender.name(), error = %e, "Notification to {} failed", sender.name());
                }
            }
        }

        if failed > 0 {
            return Err(NotifyError::Partial {
                failed,
                attempted: self.senders.len(),
            });
        }
        Ok(delivered)
    }
}
