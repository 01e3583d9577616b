use serde::{Deserialize, Serialize};

use crate::domain::models::{SelectOption, SelectOptionGroup};

pub const NOTIFICATION_EVENT: &str = "Notification";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    #[serde(rename = "text/plain")]
    PlainText,
    #[serde(rename = "application/x-atomist-slack+json")]
    SlackJson,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Button,
    /// Part of the dashboard wire vocabulary; flattened actions are always `Button`.
    Menu,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionParameter {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    pub text: String,
    #[serde(rename = "type")]
    pub kind: ActionType,
    pub registration: String,
    pub command: String,
    pub parameters: Vec<ActionParameter>,
    pub parameter_name: Option<String>,
    pub parameter_options: Option<Vec<SelectOption>>,
    pub parameter_option_groups: Option<Vec<SelectOptionGroup>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationRecipient {
    pub address: String,
}

/// Dashboard record published once per resolved recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub key: String,
    pub ts: i64,
    pub ttl: Option<i64>,
    pub post: Option<String>,
    pub body: String,
    pub content_type: ContentType,
    pub actions: Vec<NotificationAction>,
    pub recipient: Option<NotificationRecipient>,
}

impl Notification {
    /// Copy of this record with only the recipient replaced.
    pub fn addressed_to(&self, address: impl Into<String>) -> Notification {
        Notification {
            recipient: Some(NotificationRecipient {
                address: address.into(),
            }),
            ..self.clone()
        }
    }
}
