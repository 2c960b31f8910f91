//! Alert formatting and delivery channels.

pub mod console;
pub mod formatter;
pub mod manager;
pub mod slack;
pub mod webhook;

pub use console::ConsoleSender;
pub use manager::NotificationManager;
pub use slack::SlackSender;
pub use webhook::WebhookSender;

use crate::error::NotifyError;
use async_trait::async_trait;

/// One delivery channel.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Channel name used in logs.
    fn name(&self) -> &str;

    async fn send(&self, message: &str) -> Result<(), NotifyError>;
}
