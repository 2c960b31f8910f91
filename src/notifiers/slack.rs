//! Slack `chat.postMessage` sender.

use crate::error::NotifyError;
use crate::notifiers::NotificationSender;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const SLACK_API_BASE_URL: &str = "https://slack.com";

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

pub struct SlackSender {
    name: String,
    client: reqwest::Client,
    base_url: String,
    token: String,
    channel: String,
}

impl SlackSender {
    pub fn new(
        name: impl Into<String>,
        client: reqwest::Client,
        token: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            client,
            base_url: SLACK_API_BASE_URL.to_string(),
            token: token.into(),
            channel: channel.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl NotificationSender for SlackSender {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        let response: SlackResponse = self
            .client
            .post(format!("{}/api/chat.postMessage", self.base_url))
            .bearer_auth(&self.token)
            .json(&json!({ "channel": self.channel, "text": message }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.ok {
            return Err(NotifyError::Rejected {
                channel: self.name.clone(),
                reason: response.error.unwrap_or_else(|| "unknown_error".to_string()),
            });
        }
        Ok(())
    }
}
