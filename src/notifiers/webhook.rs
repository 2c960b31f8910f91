//! Generic text webhook (Feishu/Lark-style payload).

use crate::config::WebhookEndpoint;
use crate::error::NotifyError;
use crate::notifiers::NotificationSender;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

pub struct WebhookSender {
    name: String,
    client: reqwest::Client,
    endpoints: Vec<WebhookEndpoint>,
}

impl WebhookSender {
    pub fn new(
        name: impl Into<String>,
        client: reqwest::Client,
        endpoints: Vec<WebhookEndpoint>,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            endpoints,
        }
    }
}

#[async_trait]
impl NotificationSender for WebhookSender {
    fn name(&self) -> &str {
        &self.name
    }

    /// Posts to every endpoint in order; the first failing endpoint aborts the send.
    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let payload = json!({
            "msg_type": "text",
            "content": { "text": message },
        });

        for endpoint in &self.endpoints {
            let response = self.client.post(&endpoint.url).json(&payload).send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(NotifyError::Rejected {
                    channel: format!("{}/{}", self.name, endpoint.name),
                    reason: format!("status {}: {}", status.as_u16(), body),
                });
            }
            debug!(channel = %self.name, endpoint = %endpoint.name, "Webhook delivered");
        }
        Ok(())
    }
}
