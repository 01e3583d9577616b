use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::{application::services::event_bus::EventPublisher, domain::events::Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedEvent {
    pub kind: String,
    pub notification: Notification,
}

#[derive(Default)]
pub struct InMemoryEventPublisher {
    events: Arc<RwLock<Vec<PublishedEvent>>>,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn published(&self) -> Vec<PublishedEvent> {
        self.events.read().await.clone()
    }

    pub async fn addresses(&self) -> Vec<String> {
        let events = self.events.read().await;
        events
            .iter()
            .filter_map(|e| e.notification.recipient.as_ref())
            .map(|r| r.address.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, notification: Notification, kind: &str) -> anyhow::Result<()> {
        info!(
            kind,
            key = %notification.key,
            address = notification.recipient.as_ref().map(|r| r.address.as_str()),
            "recorded notification"
        );
        let mut events = self.events.write().await;
        events.push(PublishedEvent {
            kind: kind.to_string(),
            notification,
        });
        Ok(())
    }
}
