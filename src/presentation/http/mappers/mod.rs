use uuid::Uuid;

use crate::{
    application::services::listener::MessageSent,
    domain::models::{Destination, MessageOptions, RelayContext, RequestOrigin},
    presentation::{
        http::requests::{
            DestinationDto, MessageOptionsDto, OriginDto, RelayContextDto, RelayMessageRequestDto,
        },
        models::OriginKind,
    },
};

pub fn map_request(request: RelayMessageRequestDto) -> anyhow::Result<(MessageSent, RelayContext)> {
    let context = map_context(request.context)?;
    let event = MessageSent {
        message: serde_json::from_value(request.message)?,
        destinations: request.destinations.into_iter().map(map_destination).collect(),
        options: request.options.map(map_options).unwrap_or_default(),
    };
    Ok((event, context))
}

fn map_destination(dto: DestinationDto) -> Destination {
    Destination {
        team: dto.team,
        channels: dto.channels,
        users: dto.users,
    }
}

fn map_options(dto: MessageOptionsDto) -> MessageOptions {
    MessageOptions {
        id: dto.id,
        ts: dto.ts,
        ttl: dto.ttl,
        post: dto.post,
        dashboard: dto.dashboard,
    }
}

fn map_context(dto: RelayContextDto) -> anyhow::Result<RelayContext> {
    Ok(RelayContext {
        registration: dto.registration,
        workspace_id: dto.workspace_id,
        correlation_id: dto
            .correlation_id
            .unwrap_or_else(|| Uuid::new_v4().to_string()),
        origin: map_origin(dto.origin)?,
    })
}

fn map_origin(dto: OriginDto) -> anyhow::Result<RequestOrigin> {
    Ok(match dto.kind {
        OriginKind::Web => RequestOrigin::Web {
            subject: dto.subject,
        },
        OriginKind::Chat => match (dto.team_id, dto.screen_name) {
            (Some(team_id), Some(screen_name)) => RequestOrigin::Chat {
                team_id,
                screen_name,
            },
            _ => anyhow::bail!("chat origin requires teamId and screenName"),
        },
        OriginKind::Other => RequestOrigin::Other,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::models::OutboundMessage;

    fn context(origin: OriginDto) -> RelayContextDto {
        RelayContextDto {
            registration: "sdm-pack".to_string(),
            workspace_id: "AW0RKSP4C".to_string(),
            correlation_id: Some("corr-3".to_string()),
            origin,
        }
    }

    #[test]
    fn maps_chat_origin_and_payload() {
        let request = RelayMessageRequestDto {
            message: json!("Deployment finished"),
            destinations: vec![DestinationDto {
                team: "T1".to_string(),
                channels: vec![],
                users: vec!["bob".to_string()],
            }],
            options: None,
            context: context(OriginDto {
                kind: OriginKind::Chat,
                team_id: Some("T1".to_string()),
                screen_name: Some("alice".to_string()),
                ..Default::default()
            }),
        };

        let (event, ctx) = map_request(request).unwrap();

        assert_eq!(
            event.message,
            OutboundMessage::PlainText("Deployment finished".to_string())
        );
        assert_eq!(event.destinations[0].users, vec!["bob".to_string()]);
        assert_eq!(event.options, MessageOptions::default());
        assert_eq!(ctx.correlation_id, "corr-3");
        assert_eq!(
            ctx.origin,
            RequestOrigin::Chat {
                team_id: "T1".to_string(),
                screen_name: "alice".to_string()
            }
        );
    }

    #[test]
    fn chat_origin_without_screen_name_is_rejected() {
        let request = RelayMessageRequestDto {
            message: json!("hi"),
            destinations: vec![],
            options: None,
            context: context(OriginDto {
                kind: OriginKind::Chat,
                team_id: Some("T1".to_string()),
                ..Default::default()
            }),
        };

        assert!(map_request(request).is_err());
    }

    #[test]
    fn missing_correlation_id_is_generated() {
        let mut dto = context(OriginDto::default());
        dto.correlation_id = None;

        let ctx = map_context(dto).unwrap();

        assert!(Uuid::parse_str(&ctx.correlation_id).is_ok());
        assert_eq!(ctx.origin, RequestOrigin::Other);
    }
}
