use std::sync::Arc;

use anyhow::Context;
use async_nats::jetstream;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::{application::services::event_bus::EventPublisher, domain::events::Notification};

#[derive(Clone, Debug)]
pub struct JetstreamConfig {
    pub url: String,
    pub stream: String,
    pub subject_prefix: String,
}

/// Publishes notification events to `{subject_prefix}.{kind}` and waits for the stream ack.
pub struct JetstreamEventPublisher {
    context: jetstream::Context,
    subject_prefix: String,
}

impl JetstreamEventPublisher {
    pub async fn new(config: &JetstreamConfig) -> anyhow::Result<Arc<Self>> {
        let client = async_nats::connect(&config.url)
            .await
            .with_context(|| format!("failed to connect to NATS at {}", config.url))?;
        let context = jetstream::new(client);

        let subjects = format!("{}.>", config.subject_prefix);
        context
            .get_or_create_stream(jetstream::stream::Config {
                name: config.stream.clone(),
                subjects: vec![subjects.clone()],
                ..Default::default()
            })
            .await
            .with_context(|| format!("failed to open stream {}", config.stream))?;

        info!(
            stream = %config.stream,
            subjects = %subjects,
            "jetstream publisher ready"
        );

        Ok(Arc::new(Self {
            context,
            subject_prefix: config.subject_prefix.clone(),
        }))
    }

    fn subject(&self, kind: &str) -> String {
        format!("{}.{}", self.subject_prefix, kind)
    }
}

#[async_trait]
impl EventPublisher for JetstreamEventPublisher {
    async fn publish(&self, notification: Notification, kind: &str) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(&notification)?;
        let subject = self.subject(kind);
        self.context
            .publish(subject.clone(), payload.into())
            .await?
            .await
            .with_context(|| format!("no ack for {subject}"))?;
        debug!(subject = %subject, key = %notification.key, "notification published");
        Ok(())
    }
}
