#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedRecipient {
    Workspace,
    User(String),
}

impl ResolvedRecipient {
    pub fn address(&self, workspace_id: &str) -> String {
        match self {
            ResolvedRecipient::Workspace => workspace_id.to_string(),
            ResolvedRecipient::User(login) => format!("{workspace_id}-{login}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workspace_address_has_no_suffix() {
        assert_eq!(ResolvedRecipient::Workspace.address("T123"), "T123");
    }

    #[test]
    fn user_address_joins_workspace_and_login() {
        let recipient = ResolvedRecipient::User("alice".to_string());
        assert_eq!(recipient.address("T123"), "T123-alice");
    }
}
