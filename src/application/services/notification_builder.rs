use anyhow::Context;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    events::{ActionParameter, ActionType, ContentType, Notification, NotificationAction},
    models::{Attachment, ChatMessage, MessageOptions, OutboundMessage, RelayContext},
};

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMessage {
    pub message: ChatMessage,
    pub content_type: ContentType,
}

/// Returns `None` for payloads that are neither text nor a recognizable chat message.
pub fn normalize(message: OutboundMessage) -> Option<NormalizedMessage> {
    match message {
        OutboundMessage::PlainText(text) => Some(NormalizedMessage {
            message: ChatMessage::from_text(text),
            content_type: ContentType::PlainText,
        }),
        OutboundMessage::Chat(chat) if chat.is_recognized() => Some(NormalizedMessage {
            message: chat,
            content_type: ContentType::SlackJson,
        }),
        OutboundMessage::Chat(_) | OutboundMessage::Unrecognized(_) => None,
    }
}

/// Flattens every attachment's actions in order, skipping empty slots.
///
/// All actions are treated as command buttons; select menus keep their options
/// but are still typed as `button`.
pub fn flatten_actions(attachments: &[Attachment], registration: &str) -> Vec<NotificationAction> {
    attachments
        .iter()
        .flat_map(|attachment| attachment.actions.iter())
        .flatten()
        .map(|action| NotificationAction {
            text: action.text.clone(),
            kind: ActionType::Button,
            registration: registration.to_string(),
            command: action.command.name.clone(),
            parameters: action
                .command
                .parameters
                .iter()
                .map(|(name, value)| ActionParameter {
                    name: name.clone(),
                    value: stringify(value),
                })
                .collect(),
            parameter_name: action.command.parameter_name.clone(),
            parameter_options: action.options.clone(),
            parameter_option_groups: action.option_groups.clone(),
        })
        .collect()
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub fn build_notification(
    normalized: &NormalizedMessage,
    options: &MessageOptions,
    ctx: &RelayContext,
) -> anyhow::Result<Notification> {
    let body = match normalized.content_type {
        ContentType::PlainText => normalized.message.text.clone().unwrap_or_default(),
        ContentType::SlackJson => serde_json::to_string(&normalized.message)
            .context("failed to serialize chat message")?,
    };

    Ok(Notification {
        key: options
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        ts: options.ts.unwrap_or_else(|| Utc::now().timestamp_millis()),
        ttl: options.ttl,
        post: options.post.clone(),
        body,
        content_type: normalized.content_type,
        actions: flatten_actions(&normalized.message.attachments, &ctx.registration),
        recipient: None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::models::RequestOrigin;

    fn ctx() -> RelayContext {
        RelayContext {
            registration: "sdm-pack".to_string(),
            workspace_id: "T100".to_string(),
            correlation_id: "corr-1".to_string(),
            origin: RequestOrigin::Other,
        }
    }

    fn chat(value: Value) -> ChatMessage {
        match serde_json::from_value::<OutboundMessage>(value).unwrap() {
            OutboundMessage::Chat(chat) => chat,
            other => panic!("expected chat message, got {other:?}"),
        }
    }

    fn action(text: &str) -> Value {
        json!({"text": text, "type": "button", "command": {"name": format!("cmd-{text}"), "parameters": {}}})
    }

    #[test]
    fn plain_text_is_wrapped_as_chat_message() {
        let normalized = normalize(OutboundMessage::PlainText("deployed".to_string())).unwrap();
        assert_eq!(normalized.message.text.as_deref(), Some("deployed"));
        assert!(normalized.message.attachments.is_empty());
        assert_eq!(normalized.content_type, ContentType::PlainText);
    }

    #[test]
    fn unrecognized_payloads_are_not_applicable() {
        assert!(normalize(OutboundMessage::Unrecognized(json!(42))).is_none());
        assert!(normalize(OutboundMessage::Chat(chat(json!({"blocks": []})))).is_none());
    }

    #[test]
    fn text_messages_with_null_collections_are_still_forwarded() {
        for payload in [
            json!({"text": "Build failed", "attachments": null}),
            json!({"text": "Build failed", "attachments": [{"actions": null}]}),
            json!({"text": "Build failed", "attachments": [{"actions": [{"type": "button", "url": "https://example.com"}]}]}),
        ] {
            let message: OutboundMessage = serde_json::from_value(payload.clone()).unwrap();
            let normalized = normalize(message);
            assert!(normalized.is_some(), "dropped {payload}");
            assert_eq!(normalized.unwrap().content_type, ContentType::SlackJson);
        }
    }

    #[test]
    fn json_payloads_deserialize_into_the_right_variant() {
        let text: OutboundMessage = serde_json::from_value(json!("hi")).unwrap();
        assert_eq!(text, OutboundMessage::PlainText("hi".to_string()));

        let list: OutboundMessage = serde_json::from_value(json!([1, 2])).unwrap();
        assert!(matches!(list, OutboundMessage::Unrecognized(_)));
    }

    #[test]
    fn flattening_preserves_attachment_then_action_order() {
        let message = chat(json!({
            "attachments": [
                {"actions": [action("a"), null, action("b")]},
                {"text": "no actions"},
                {"actions": [action("c")]}
            ]
        }));

        let actions = flatten_actions(&message.attachments, "sdm-pack");
        let texts: Vec<_> = actions.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert!(actions.iter().all(|a| a.registration == "sdm-pack"));
        assert_eq!(actions[2].command, "cmd-c");
    }

    #[test]
    fn parameters_are_stringified_in_declaration_order() {
        let message = chat(json!({
            "attachments": [{"actions": [{
                "text": "Approve",
                "command": {
                    "name": "ApproveGoal",
                    "parameters": {"goal": "build", "attempt": 3, "force": true, "sha": null}
                }
            }]}]
        }));

        let actions = flatten_actions(&message.attachments, "sdm-pack");
        assert_eq!(
            actions[0].parameters,
            vec![
                ActionParameter {
                    name: "goal".to_string(),
                    value: Some("build".to_string()),
                },
                ActionParameter {
                    name: "attempt".to_string(),
                    value: Some("3".to_string()),
                },
                ActionParameter {
                    name: "force".to_string(),
                    value: Some("true".to_string()),
                },
                ActionParameter {
                    name: "sha".to_string(),
                    value: None,
                },
            ]
        );
    }

    #[test]
    fn menus_are_flattened_as_buttons_with_options() {
        let message = chat(json!({
            "attachments": [{"actions": [{
                "text": "Pick branch",
                "type": "select",
                "command": {"name": "SetBranch", "parameters": {}, "parameterName": "branch"},
                "options": [{"text": "main", "value": "main"}]
            }]}]
        }));

        let actions = flatten_actions(&message.attachments, "sdm-pack");
        assert_eq!(actions[0].kind, ActionType::Button);
        assert_eq!(actions[0].parameter_name.as_deref(), Some("branch"));
        assert_eq!(actions[0].parameter_options.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn notification_uses_caller_supplied_key_and_timestamp() {
        let normalized = normalize(OutboundMessage::PlainText("hello".to_string())).unwrap();
        let options = MessageOptions {
            id: Some("msg-1".to_string()),
            ts: Some(1_700_000_000_000),
            ttl: Some(60_000),
            post: Some("update_only".to_string()),
            dashboard: None,
        };

        let notification = build_notification(&normalized, &options, &ctx()).unwrap();
        assert_eq!(notification.key, "msg-1");
        assert_eq!(notification.ts, 1_700_000_000_000);
        assert_eq!(notification.ttl, Some(60_000));
        assert_eq!(notification.post.as_deref(), Some("update_only"));
        assert_eq!(notification.body, "hello");
        assert_eq!(notification.content_type, ContentType::PlainText);
        assert!(notification.recipient.is_none());
    }

    #[test]
    fn notification_generates_key_and_timestamp_when_absent() {
        let normalized = normalize(OutboundMessage::PlainText("hello".to_string())).unwrap();
        let before = Utc::now().timestamp_millis();

        let first = build_notification(&normalized, &MessageOptions::default(), &ctx()).unwrap();
        let second = build_notification(&normalized, &MessageOptions::default(), &ctx()).unwrap();

        assert!(Uuid::parse_str(&first.key).is_ok());
        assert_ne!(first.key, second.key);
        assert!(first.ts >= before);
        assert_eq!(first.ttl, None);
    }

    #[test]
    fn structured_messages_are_serialized_as_json() {
        let message = chat(json!({"text": "Build failed", "attachments": [{"fallback": "f"}]}));
        let normalized = normalize(OutboundMessage::Chat(message)).unwrap();

        let notification =
            build_notification(&normalized, &MessageOptions::default(), &ctx()).unwrap();
        assert_eq!(notification.content_type, ContentType::SlackJson);
        let body: Value = serde_json::from_str(&notification.body).unwrap();
        assert_eq!(body, json!({"text": "Build failed", "attachments": [{"fallback": "f"}]}));
    }
}
