use std::env::var;

use dotenvy::dotenv;
use notification_relay::infrastructure::{
    identity::graphql::GraphqlConfig, messaging::jetstream::JetstreamConfig,
};

pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    /// Without `NATS_URL` notifications are only recorded in memory.
    pub jetstream: Option<JetstreamConfig>,
    /// Without `GRAPHQL_URL` no screen name resolves to a login.
    pub graphql: Option<GraphqlConfig>,
    pub cluster_enabled: bool,
    pub cluster_worker: bool,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        let jetstream = match var("NATS_URL") {
            Ok(url) => Some(JetstreamConfig {
                url,
                stream: var("NATS_STREAM").unwrap_or_else(|_| "NOTIFICATIONS".to_string()),
                subject_prefix: var("NATS_SUBJECT_PREFIX")
                    .unwrap_or_else(|_| "notifications".to_string()),
            }),
            Err(_) => None,
        };

        let graphql = match var("GRAPHQL_URL") {
            Ok(url) => Some(GraphqlConfig {
                url,
                token: var("GRAPHQL_TOKEN")
                    .map_err(|_| "GRAPHQL_TOKEN is required when GRAPHQL_URL is set")?,
            }),
            Err(_) => None,
        };

        Ok(Config {
            port: var("PORT")
                .map_err(|_| "An error occured while getting PORT env param")?
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            scheme: var("SCHEME").map_err(|_| "An error occured while getting SCHEME env param")?,
            host: var("HOST").map_err(|_| "An error occured while getting HOST env param")?,
            jetstream,
            graphql,
            cluster_enabled: flag("CLUSTER_ENABLED")
                .map_err(|_| "An error occured while parsing CLUSTER_ENABLED env param")?,
            cluster_worker: flag("CLUSTER_WORKER")
                .map_err(|_| "An error occured while parsing CLUSTER_WORKER env param")?,
        })
    }
}

fn flag(name: &str) -> Result<bool, ()> {
    match var(name).as_deref() {
        Err(_) | Ok("") | Ok("0") | Ok("false") => Ok(false),
        Ok("1") | Ok("true") => Ok(true),
        Ok(_) => Err(()),
    }
}
