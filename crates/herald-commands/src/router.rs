//! Interaction router: filters inbound events, looks up the registry, and
//! dispatches to the matched executor with error containment.
//!
//! Per interaction, the steps are strictly sequential: filter on event
//! kind, registry lookup, executor invocation, and (on failure) exactly
//! one ephemeral error notice — a follow-up when the interaction was
//! already replied or deferred, a direct reply otherwise. An unmatched
//! command is logged and dropped with no user-facing reply.

use std::sync::Arc;

use tracing::{debug, error, warn};

use herald_gateway::{InboundEvent, Interaction, ReplyMessage, ReplyState};

use crate::registry::CommandRegistry;

/// Generic failure notice sent when an executor errors.
const EXECUTION_FAILURE_TEXT: &str = "There was an error while executing this command!";

/// Terminal state of one routed interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The event was not a command invocation; nothing happened.
    Ignored,
    /// No registered command matched; logged, no reply sent.
    Unmatched,
    /// The executor completed normally.
    Succeeded,
    /// The executor failed; an error notice was attempted.
    Failed,
}

/// Routes inbound interaction events to registered command executors.
#[derive(Clone)]
pub struct CommandRouter {
    registry: Arc<CommandRegistry>,
}

impl CommandRouter {
    /// Create a router over a fully populated registry.
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    /// Route one inbound event.
    ///
    /// Executor failures are contained here: logged and answered with a
    /// generic ephemeral notice, never propagated.
    pub async fn route(&self, event: InboundEvent) -> RouteOutcome {
        let interaction = match event {
            InboundEvent::Command(interaction) => interaction,
            other => {
                debug!(kind = other.kind(), "ignoring non-command event");
                return RouteOutcome::Ignored;
            }
        };

        let name = interaction.command_name().to_string();
        let Some(command) = self.registry.get(&name) else {
            error!(command = %name, "no matching command registered");
            return RouteOutcome::Unmatched;
        };

        match command.handler.execute(interaction.as_ref()).await {
            Ok(()) => RouteOutcome::Succeeded,
            Err(err) => {
                error!(command = %name, error = %err, "command execution failed");
                self.send_failure_notice(interaction.as_ref(), &name).await;
                RouteOutcome::Failed
            }
        }
    }

    /// Deliver the generic failure notice: a follow-up if the interaction
    /// was already replied or deferred, a direct reply otherwise.
    async fn send_failure_notice(&self, interaction: &dyn Interaction, command: &str) {
        let notice = ReplyMessage::ephemeral(EXECUTION_FAILURE_TEXT);
        let delivery = match interaction.reply_state() {
            ReplyState::None => interaction.reply(notice).await,
            ReplyState::Deferred | ReplyState::Replied => interaction.follow_up(notice).await,
        };

        if let Err(err) = delivery {
            warn!(command = %command, error = %err, "failed to deliver error notice");
        }
    }
}
