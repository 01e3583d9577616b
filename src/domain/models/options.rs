use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageOptions {
    pub id: Option<String>,
    pub ts: Option<i64>,
    pub ttl: Option<i64>,
    pub post: Option<String>,
    /// `Some(false)` keeps the message off the dashboard.
    pub dashboard: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    pub team: String,
    #[serde(default)]
    pub channels: Vec<String>,
    /// Chat screen names, not yet resolved to logins.
    #[serde(default)]
    pub users: Vec<String>,
}

impl Destination {
    pub fn channels(team: impl Into<String>, channels: Vec<String>) -> Self {
        Self {
            team: team.into(),
            channels,
            users: Vec::new(),
        }
    }

    pub fn users(team: impl Into<String>, users: Vec<String>) -> Self {
        Self {
            team: team.into(),
            channels: Vec::new(),
            users,
        }
    }
}
