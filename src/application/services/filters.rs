use crate::domain::models::MessageOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotLeader,
    Lifecycle,
    DashboardDisabled,
    UnrecognizedMessage,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotLeader => "not_leader",
            SkipReason::Lifecycle => "lifecycle",
            SkipReason::DashboardDisabled => "dashboard_disabled",
            SkipReason::UnrecognizedMessage => "unrecognized_message",
        }
    }
}

/// Decides whether this process is the one allowed to forward messages.
///
/// Leader election itself belongs to the clustering layer; only its outcome
/// (`is_worker`) is consumed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderFilter {
    cluster_enabled: bool,
    is_worker: bool,
}

impl LeaderFilter {
    pub fn new(cluster_enabled: bool, is_worker: bool) -> Self {
        Self {
            cluster_enabled,
            is_worker,
        }
    }

    pub fn standalone() -> Self {
        Self::new(false, false)
    }

    pub fn should_proceed(&self) -> bool {
        !self.cluster_enabled || self.is_worker
    }
}

pub fn ignored_by_policy(options: &MessageOptions) -> Option<SkipReason> {
    if options
        .id
        .as_deref()
        .is_some_and(|id| id.contains("lifecycle"))
    {
        return Some(SkipReason::Lifecycle);
    }
    if options.dashboard == Some(false) {
        return Some(SkipReason::DashboardDisabled);
    }
    None
}
