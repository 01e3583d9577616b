use std::io::Error;
use std::sync::Arc;

use notification_relay::{
    application::{
        services::{event_bus::EventPublisher, identity::IdentityResolver},
        usecases::register_relay::{
            AutomationConfiguration, ClusterSettings, register_notification_relay,
        },
    },
    infrastructure::{
        identity::{graphql::GraphqlIdentityResolver, in_memory::InMemoryIdentityResolver},
        messaging::{in_memory::InMemoryEventPublisher, jetstream::JetstreamEventPublisher},
    },
    presentation::http::endpoints::{
        messages::MessagesEndpoints,
        root::{ApiState, Endpoints},
    },
};
use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

mod config;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let publisher: Arc<dyn EventPublisher> = match &config.jetstream {
        Some(jetstream) => JetstreamEventPublisher::new(jetstream)
            .await
            .map_err(Error::other)? as Arc<dyn EventPublisher>,
        None => {
            warn!("NATS_URL not set, notifications are only kept in memory");
            Arc::new(InMemoryEventPublisher::new())
        }
    };

    let resolver: Arc<dyn IdentityResolver> = match &config.graphql {
        Some(graphql) => {
            GraphqlIdentityResolver::new(graphql).map_err(Error::other)? as Arc<dyn IdentityResolver>
        }
        None => {
            warn!("GRAPHQL_URL not set, chat users will not resolve to logins");
            Arc::new(InMemoryIdentityResolver::new())
        }
    };

    let configuration = register_notification_relay(
        AutomationConfiguration::new(ClusterSettings {
            enabled: config.cluster_enabled,
        }),
        publisher,
        resolver,
        config.cluster_worker,
    );
    let state = Arc::new(ApiState { configuration });

    let server_url = format!("{}://{}:{}", config.scheme, config.host, config.port);

    info!(url = %server_url, "starting server");

    let api_service = OpenApiService::new(
        (Endpoints, MessagesEndpoints::new(state)),
        "Notification Relay API",
        "0.1.0",
    )
    .server(format!("{}/api", server_url));
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/api", api_service).nest("/", ui);

    Server::new(TcpListener::bind(format!("localhost:{}", config.port)))
        .run(app)
        .await
}
