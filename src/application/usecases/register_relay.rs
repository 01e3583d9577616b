use std::sync::Arc;

use tracing::info;

use crate::application::{
    handlers::notification_relay::NotificationRelay,
    services::{
        event_bus::EventPublisher, filters::LeaderFilter, identity::IdentityResolver,
        listener::MessageListener,
    },
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ClusterSettings {
    pub enabled: bool,
}

#[derive(Clone, Default)]
pub struct AutomationConfiguration {
    pub cluster: ClusterSettings,
    pub listeners: Vec<Arc<dyn MessageListener>>,
}

impl AutomationConfiguration {
    pub fn new(cluster: ClusterSettings) -> Self {
        Self {
            cluster,
            listeners: Vec::new(),
        }
    }
}

/// Appends the notification relay to the configured listeners.
///
/// `is_worker` is the clustering layer's verdict for this process; it only
/// matters when clustering is enabled in `configuration`.
pub fn register_notification_relay(
    mut configuration: AutomationConfiguration,
    publisher: Arc<dyn EventPublisher>,
    resolver: Arc<dyn IdentityResolver>,
    is_worker: bool,
) -> AutomationConfiguration {
    let leader = LeaderFilter::new(configuration.cluster.enabled, is_worker);
    info!(
        cluster_enabled = configuration.cluster.enabled,
        forwarding = leader.should_proceed(),
        "registering notification relay"
    );
    configuration
        .listeners
        .push(Arc::new(NotificationRelay::new(publisher, resolver, leader)));
    configuration
}
