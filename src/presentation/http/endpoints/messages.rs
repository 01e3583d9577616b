use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};
use tracing::warn;

use crate::{
    application::services::listener::ListenerOutcome,
    presentation::http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::map_request,
        requests::RelayMessageRequestDto,
        responses::RelayMessageResponseDto,
    },
};

#[derive(Clone)]
pub struct MessagesEndpoints {
    state: Arc<ApiState>,
}

impl MessagesEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl MessagesEndpoints {
    /// Report one outbound message to every registered listener.
    #[oai(
        path = "/messages",
        method = "post",
        tag = EndpointsTags::Messages,
    )]
    pub async fn message_sent(
        &self,
        request: Json<RelayMessageRequestDto>,
    ) -> PoemResult<Json<RelayMessageResponseDto>> {
        let (event, ctx) = map_request(request.0).map_err(bad_request)?;

        let mut response = RelayMessageResponseDto {
            forwarded: false,
            addresses: Vec::new(),
            skipped: Vec::new(),
        };
        for listener in &self.state.configuration.listeners {
            let outcome = listener
                .message_sent(event.clone(), &ctx)
                .await
                .map_err(|err| {
                    warn!(listener = listener.name(), error = ?err, "listener failed");
                    internal_error(err)
                })?;
            match outcome {
                ListenerOutcome::Emitted { addresses } => {
                    response.forwarded = true;
                    response.addresses.extend(addresses);
                }
                ListenerOutcome::Skipped(reason) => {
                    response.skipped.push(reason.as_str().to_string());
                }
            }
        }

        Ok(Json(response))
    }
}

fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(
        format!("{err:#}"),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}

fn bad_request(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(err.to_string(), poem::http::StatusCode::BAD_REQUEST)
}
