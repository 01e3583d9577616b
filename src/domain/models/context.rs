use serde::{Deserialize, Serialize};

/// Where the request that produced the outbound message came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequestOrigin {
    Web { subject: Option<String> },
    Chat { team_id: String, screen_name: String },
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayContext {
    /// Name of the registration whose commands the message's actions invoke.
    pub registration: String,
    pub workspace_id: String,
    pub correlation_id: String,
    pub origin: RequestOrigin,
}
