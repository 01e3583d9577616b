use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const CHAT_ID_BY_SCREEN_NAME: &str = r#"query ChatIdByScreenName($teamId: ID!, $screenName: String!) {
  ChatTeam(id: $teamId) {
    members(screenName: $screenName) {
      screenName
      person {
        gitHubId {
          login
        }
      }
    }
  }
}"#;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatIdVariables {
    pub team_id: String,
    pub screen_name: String,
}

impl ChatIdVariables {
    pub fn new(team_id: impl Into<String>, screen_name: impl Into<String>) -> Self {
        Self {
            team_id: team_id.into(),
            screen_name: screen_name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatIdQueryResult {
    #[serde(rename = "ChatTeam", default)]
    pub chat_team: Option<Vec<ChatTeam>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatTeam {
    #[serde(default)]
    pub members: Option<Vec<ChatMember>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMember {
    #[serde(default)]
    pub screen_name: Option<String>,
    #[serde(default)]
    pub person: Option<Person>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default)]
    pub git_hub_id: Option<GitHubId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubId {
    #[serde(default)]
    pub login: Option<String>,
}

impl ChatIdQueryResult {
    pub fn with_login(screen_name: &str, login: &str) -> Self {
        Self {
            chat_team: Some(vec![ChatTeam {
                members: Some(vec![ChatMember {
                    screen_name: Some(screen_name.to_string()),
                    person: Some(Person {
                        git_hub_id: Some(GitHubId {
                            login: Some(login.to_string()),
                        }),
                    }),
                }]),
            }]),
        }
    }

    /// Login of the first matching member; a gap anywhere on the path means no match.
    pub fn login(&self) -> Option<&str> {
        self.chat_team
            .as_ref()?
            .first()?
            .members
            .as_ref()?
            .first()?
            .person
            .as_ref()?
            .git_hub_id
            .as_ref()?
            .login
            .as_deref()
    }
}

#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn query(
        &self,
        document: &str,
        variables: ChatIdVariables,
    ) -> anyhow::Result<ChatIdQueryResult>;
}
