use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, join_all};
use tracing::{debug, info, warn};

use crate::{
    application::services::{
        event_bus::EventPublisher,
        filters::{LeaderFilter, SkipReason, ignored_by_policy},
        identity::{CHAT_ID_BY_SCREEN_NAME, ChatIdVariables, IdentityResolver},
        listener::{ListenerOutcome, MessageListener, MessageSent},
        notification_builder::{build_notification, normalize},
    },
    domain::{
        errors::RelayError,
        events::{NOTIFICATION_EVENT, Notification},
        models::{Destination, RelayContext, RequestOrigin},
        value_objects::ResolvedRecipient,
    },
};

/// Address emitted to by a branch, or `None` when the branch dropped its recipient.
type Branch<'a> = BoxFuture<'a, anyhow::Result<Option<String>>>;

/// Forwards outbound chat messages to the dashboard as `Notification` events.
pub struct NotificationRelay {
    publisher: Arc<dyn EventPublisher>,
    resolver: Arc<dyn IdentityResolver>,
    leader: LeaderFilter,
}

impl NotificationRelay {
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        resolver: Arc<dyn IdentityResolver>,
        leader: LeaderFilter,
    ) -> Self {
        Self {
            publisher,
            resolver,
            leader,
        }
    }

    pub async fn handle(
        &self,
        event: MessageSent,
        ctx: &RelayContext,
    ) -> Result<ListenerOutcome, RelayError> {
        if !self.leader.should_proceed() {
            return Ok(skip(SkipReason::NotLeader, ctx));
        }
        if let Some(reason) = ignored_by_policy(&event.options) {
            return Ok(skip(reason, ctx));
        }
        let Some(normalized) = normalize(event.message) else {
            return Ok(skip(SkipReason::UnrecognizedMessage, ctx));
        };

        let notification = build_notification(&normalized, &event.options, ctx)?;

        let branches = if event.destinations.is_empty() {
            vec![self.reply_branch(&notification, ctx)]
        } else {
            self.destination_branches(&notification, &event.destinations, ctx)
        };

        let addresses = settle(join_all(branches).await)?;
        info!(
            workspace = %ctx.workspace_id,
            correlation_id = %ctx.correlation_id,
            key = %notification.key,
            count = addresses.len(),
            "forwarded notification"
        );
        Ok(ListenerOutcome::Emitted { addresses })
    }

    /// No explicit destination: answer whoever issued the original request.
    fn reply_branch<'a>(
        &'a self,
        notification: &'a Notification,
        ctx: &'a RelayContext,
    ) -> Branch<'a> {
        match &ctx.origin {
            RequestOrigin::Web {
                subject: Some(subject),
            } if !subject.is_empty() => async move {
                let recipient = ResolvedRecipient::User(subject.clone());
                self.emit(notification, recipient, ctx).await.map(Some)
            }
            .boxed(),
            RequestOrigin::Chat {
                team_id,
                screen_name,
            } => async move {
                let variables = ChatIdVariables::new(team_id.as_str(), screen_name.as_str());
                match self.resolve_login(variables).await? {
                    Some(login) => self
                        .emit(notification, ResolvedRecipient::User(login), ctx)
                        .await
                        .map(Some),
                    None => {
                        debug!(
                            team = %team_id,
                            screen_name = %screen_name,
                            "no login for chat user, dropping reply"
                        );
                        Ok(None)
                    }
                }
            }
            .boxed(),
            RequestOrigin::Web { .. } | RequestOrigin::Other => async move {
                self.emit(notification, ResolvedRecipient::Workspace, ctx)
                    .await
                    .map(Some)
            }
            .boxed(),
        }
    }

    /// One workspace-wide emission plus one per distinct (team, screen name) pair.
    fn destination_branches<'a>(
        &'a self,
        notification: &'a Notification,
        destinations: &[Destination],
        ctx: &'a RelayContext,
    ) -> Vec<Branch<'a>> {
        let mut branches: Vec<Branch<'a>> = vec![
            async move {
                self.emit(notification, ResolvedRecipient::Workspace, ctx)
                    .await
                    .map(Some)
            }
            .boxed(),
        ];

        for variables in unique_users(destinations) {
            branches.push(
                async move {
                    let screen_name = variables.screen_name.clone();
                    let recipient = match self.resolve_login(variables).await? {
                        Some(login) => ResolvedRecipient::User(login),
                        None => ResolvedRecipient::User(screen_name),
                    };
                    self.emit(notification, recipient, ctx).await.map(Some)
                }
                .boxed(),
            );
        }

        branches
    }

    async fn resolve_login(&self, variables: ChatIdVariables) -> anyhow::Result<Option<String>> {
        let description = format!("{}/{}", variables.team_id, variables.screen_name);
        let result = self
            .resolver
            .query(CHAT_ID_BY_SCREEN_NAME, variables)
            .await
            .with_context(|| format!("identity lookup failed for {description}"))?;
        Ok(result.login().map(str::to_string))
    }

    async fn emit(
        &self,
        notification: &Notification,
        recipient: ResolvedRecipient,
        ctx: &RelayContext,
    ) -> anyhow::Result<String> {
        let address = recipient.address(&ctx.workspace_id);
        self.publisher
            .publish(notification.addressed_to(address.clone()), NOTIFICATION_EVENT)
            .await
            .with_context(|| format!("failed to publish notification to {address}"))?;
        debug!(address = %address, key = %notification.key, "published notification");
        Ok(address)
    }
}

#[async_trait]
impl MessageListener for NotificationRelay {
    fn name(&self) -> &str {
        "notification-relay"
    }

    async fn message_sent(
        &self,
        event: MessageSent,
        ctx: &RelayContext,
    ) -> anyhow::Result<ListenerOutcome> {
        Ok(self.handle(event, ctx).await?)
    }
}

fn skip(reason: SkipReason, ctx: &RelayContext) -> ListenerOutcome {
    debug!(
        reason = reason.as_str(),
        correlation_id = %ctx.correlation_id,
        "not forwarding message"
    );
    ListenerOutcome::Skipped(reason)
}

fn unique_users(destinations: &[Destination]) -> Vec<ChatIdVariables> {
    let mut seen = HashSet::new();
    destinations
        .iter()
        .flat_map(|d| {
            d.users
                .iter()
                .map(move |user| ChatIdVariables::new(d.team.as_str(), user.as_str()))
        })
        .filter(|variables| seen.insert(variables.clone()))
        .collect()
}

/// Every branch has already run to completion; report the first failure if any.
fn settle(results: Vec<anyhow::Result<Option<String>>>) -> Result<Vec<String>, RelayError> {
    let total = results.len();
    let mut addresses = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(Some(address)) => addresses.push(address),
            Ok(None) => {}
            Err(err) => {
                warn!(error = ?err, "notification branch failed");
                failures.push(err);
            }
        }
    }

    let failed = failures.len();
    match failures.into_iter().next() {
        Some(first) => Err(RelayError::Emission {
            failed,
            total,
            first,
        }),
        None => Ok(addresses),
    }
}
