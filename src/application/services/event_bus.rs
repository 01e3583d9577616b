use async_trait::async_trait;

use crate::domain::events::Notification;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, notification: Notification, kind: &str) -> anyhow::Result<()>;
}
