use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::services::identity::{
    ChatIdQueryResult, ChatIdVariables, IdentityResolver,
};

/// Static screen name to login table; remembers every query it answers.
#[derive(Default)]
pub struct InMemoryIdentityResolver {
    logins: HashMap<ChatIdVariables, String>,
    queries: Arc<RwLock<Vec<ChatIdVariables>>>,
}

impl InMemoryIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_login(mut self, team_id: &str, screen_name: &str, login: &str) -> Self {
        self.logins
            .insert(ChatIdVariables::new(team_id, screen_name), login.to_string());
        self
    }

    pub async fn queries(&self) -> Vec<ChatIdVariables> {
        self.queries.read().await.clone()
    }
}

#[async_trait]
impl IdentityResolver for InMemoryIdentityResolver {
    async fn query(
        &self,
        _document: &str,
        variables: ChatIdVariables,
    ) -> anyhow::Result<ChatIdQueryResult> {
        let result = match self.logins.get(&variables) {
            Some(login) => ChatIdQueryResult::with_login(&variables.screen_name, login),
            None => ChatIdQueryResult::default(),
        };
        self.queries.write().await.push(variables);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::identity::CHAT_ID_BY_SCREEN_NAME;

    #[tokio::test]
    async fn answers_known_screen_names_and_records_queries() {
        let resolver = InMemoryIdentityResolver::new().with_login("T1", "bob", "bob-gh");

        let known = resolver
            .query(CHAT_ID_BY_SCREEN_NAME, ChatIdVariables::new("T1", "bob"))
            .await
            .unwrap();
        let unknown = resolver
            .query(CHAT_ID_BY_SCREEN_NAME, ChatIdVariables::new("T2", "bob"))
            .await
            .unwrap();

        assert_eq!(known.login(), Some("bob-gh"));
        assert_eq!(unknown.login(), None);
        assert_eq!(resolver.queries().await.len(), 2);
    }
}
