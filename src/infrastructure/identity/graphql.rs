use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::services::identity::{
    ChatIdQueryResult, ChatIdVariables, IdentityResolver,
};

#[derive(Clone, Debug)]
pub struct GraphqlConfig {
    pub url: String,
    pub token: String,
}

pub struct GraphqlIdentityResolver {
    http: Client,
    url: String,
    token: String,
}

impl GraphqlIdentityResolver {
    pub fn new(config: &GraphqlConfig) -> anyhow::Result<Arc<Self>> {
        let http = Client::builder()
            .user_agent("notification-relay/graphql")
            .build()
            .context("failed to build graphql client")?;
        Ok(Arc::new(Self {
            http,
            url: config.url.clone(),
            token: config.token.clone(),
        }))
    }
}

#[async_trait]
impl IdentityResolver for GraphqlIdentityResolver {
    async fn query(
        &self,
        document: &str,
        variables: ChatIdVariables,
    ) -> anyhow::Result<ChatIdQueryResult> {
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&GraphqlRequest {
                query: document,
                variables: &variables,
            })
            .send()
            .await?
            .error_for_status()?;

        let payload: GraphqlResponse<ChatIdQueryResult> = response.json().await?;
        payload.into_data()
    }
}

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

impl<T: Default> GraphqlResponse<T> {
    fn into_data(self) -> anyhow::Result<T> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            anyhow::bail!("graphql api returned error: {}", messages.join("; "));
        }
        Ok(self.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_means_no_match() {
        let payload: GraphqlResponse<ChatIdQueryResult> =
            serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert_eq!(payload.into_data().unwrap().login(), None);
    }

    #[test]
    fn graphql_errors_are_failures() {
        let payload: GraphqlResponse<ChatIdQueryResult> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "not authorized"}, {"message": "bad team"}]}"#,
        )
        .unwrap();
        let err = payload.into_data().unwrap_err();
        assert_eq!(
            err.to_string(),
            "graphql api returned error: not authorized; bad team"
        );
    }

    #[test]
    fn request_carries_query_and_variables() {
        let variables = ChatIdVariables::new("T1", "alice");
        let request = GraphqlRequest {
            query: "query Q { x }",
            variables: &variables,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "query": "query Q { x }",
                "variables": {"teamId": "T1", "screenName": "alice"}
            })
        );
    }
}
