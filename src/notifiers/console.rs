use crate::error::NotifyError;
use crate::notifiers::NotificationSender;
use async_trait::async_trait;

pub struct ConsoleSender {
    name: String,
}

impl ConsoleSender {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl NotificationSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, message: &str) -> Result<(), NotifyError> {
        println!("{}", message);
        Ok(())
    }
}
