//! Core interaction trait and types for the host-client boundary.
//!
//! An [`Interaction`] is one inbound slash-command invocation delivered by
//! the platform client. The router reads the command name and reply-state
//! and calls the reply methods; the interaction's lifecycle is otherwise
//! owned by the host library.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from gateway operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The platform API rejected or failed a call.
    #[error("platform API call failed: {0}")]
    Api(#[from] serenity::Error),

    /// `reply` or `defer` on an interaction that was already acknowledged.
    #[error("interaction already acknowledged")]
    AlreadyAcknowledged,

    /// `follow_up` on an interaction that has not been acknowledged yet.
    #[error("interaction not yet acknowledged")]
    NotAcknowledged,

    #[error("{0}")]
    Other(String),
}

/// Acknowledgement state of an interaction.
///
/// Mirrors the host library's replied/deferred flags and decides whether
/// the router's error notice goes out as a direct reply or a follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    /// No response has been sent yet.
    #[default]
    None,
    /// The interaction was deferred; only follow-ups may be sent.
    Deferred,
    /// An initial reply has been sent; only follow-ups may be sent.
    Replied,
}

impl ReplyState {
    /// Whether the interaction has been replied to or deferred.
    pub fn acknowledged(self) -> bool {
        self != ReplyState::None
    }
}

/// An outbound reply to an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyMessage {
    /// The message text.
    pub content: String,
    /// Whether the message is visible only to the invoker.
    pub ephemeral: bool,
}

impl ReplyMessage {
    /// Create a plain text reply.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// Create a reply visible only to the invoker.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// One inbound command invocation and its reply capabilities.
///
/// Implemented by the platform adapter
/// ([`crate::discord::DiscordInteraction`]) and by test doubles. All
/// methods take `&self`; reply-state is tracked internally by the
/// implementation.
#[async_trait]
pub trait Interaction: Send + Sync {
    /// Name of the invoked command.
    fn command_name(&self) -> &str;

    /// Current acknowledgement state.
    fn reply_state(&self) -> ReplyState;

    /// Send the initial reply. Fails with
    /// [`GatewayError::AlreadyAcknowledged`] if a reply or deferral was
    /// already sent.
    async fn reply(&self, message: ReplyMessage) -> Result<(), GatewayError>;

    /// Acknowledge without replying, buying time for slow work.
    /// Subsequent output must use [`Interaction::follow_up`].
    async fn defer(&self, ephemeral: bool) -> Result<(), GatewayError>;

    /// Send a follow-up message after a reply or deferral. Fails with
    /// [`GatewayError::NotAcknowledged`] before any acknowledgement.
    async fn follow_up(&self, message: ReplyMessage) -> Result<(), GatewayError>;
}

/// An inbound event from the platform, reduced to the kinds the router
/// distinguishes. Only [`InboundEvent::Command`] is dispatched; every
/// other kind is ignored.
pub enum InboundEvent {
    /// A structured command invocation.
    Command(Arc<dyn Interaction>),
    /// An autocomplete request for a command option.
    Autocomplete,
    /// A message component interaction (button, select menu).
    Component,
    /// A modal submission.
    Modal,
    /// Any other interaction kind (e.g. gateway ping).
    Other,
}

impl InboundEvent {
    /// Short label for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Command(_) => "command",
            InboundEvent::Autocomplete => "autocomplete",
            InboundEvent::Component => "component",
            InboundEvent::Modal => "modal",
            InboundEvent::Other => "other",
        }
    }
}
