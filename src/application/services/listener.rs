use async_trait::async_trait;

use crate::{
    application::services::filters::SkipReason,
    domain::models::{Destination, MessageOptions, OutboundMessage, RelayContext},
};

/// One outbound message as observed by listeners.
#[derive(Debug, Clone)]
pub struct MessageSent {
    pub message: OutboundMessage,
    pub destinations: Vec<Destination>,
    pub options: MessageOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerOutcome {
    Skipped(SkipReason),
    Emitted { addresses: Vec<String> },
}

#[async_trait]
pub trait MessageListener: Send + Sync {
    fn name(&self) -> &str;

    async fn message_sent(
        &self,
        event: MessageSent,
        ctx: &RelayContext,
    ) -> anyhow::Result<ListenerOutcome>;
}
