//! Discord gateway adapter built on serenity.
//!
//! Maps `interaction_create` events into [`InboundEvent`]s forwarded
//! through an mpsc channel, registers command descriptors on `ready`, and
//! tracks per-interaction reply-state so the router can choose between
//! direct replies and follow-ups.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    Client, CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, EventHandler,
    GatewayIntents, GuildId, Http, Ready,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use herald_types::CommandDescriptor;

use crate::interaction::{GatewayError, InboundEvent, Interaction, ReplyMessage, ReplyState};

const STATE_NONE: u8 = 0;
const STATE_DEFERRED: u8 = 1;
const STATE_REPLIED: u8 = 2;

/// A slash-command invocation received from Discord.
///
/// Wraps serenity's [`CommandInteraction`] together with the HTTP handle
/// needed to answer it. Reply-state is tracked locally, mirroring the
/// host library's replied/deferred flags.
pub struct DiscordInteraction {
    inner: CommandInteraction,
    http: Arc<Http>,
    state: AtomicU8,
}

impl DiscordInteraction {
    fn new(inner: CommandInteraction, http: Arc<Http>) -> Self {
        Self {
            inner,
            http,
            state: AtomicU8::new(STATE_NONE),
        }
    }
}

#[async_trait]
impl Interaction for DiscordInteraction {
    fn command_name(&self) -> &str {
        &self.inner.data.name
    }

    fn reply_state(&self) -> ReplyState {
        match self.state.load(Ordering::Acquire) {
            STATE_DEFERRED => ReplyState::Deferred,
            STATE_REPLIED => ReplyState::Replied,
            _ => ReplyState::None,
        }
    }

    async fn reply(&self, message: ReplyMessage) -> Result<(), GatewayError> {
        if self.reply_state().acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged);
        }

        let builder = CreateInteractionResponseMessage::new()
            .content(message.content)
            .ephemeral(message.ephemeral);
        self.inner
            .create_response(&self.http, CreateInteractionResponse::Message(builder))
            .await?;
        self.state.store(STATE_REPLIED, Ordering::Release);
        Ok(())
    }

    async fn defer(&self, ephemeral: bool) -> Result<(), GatewayError> {
        if self.reply_state().acknowledged() {
            return Err(GatewayError::AlreadyAcknowledged);
        }

        let builder = CreateInteractionResponseMessage::new().ephemeral(ephemeral);
        self.inner
            .create_response(&self.http, CreateInteractionResponse::Defer(builder))
            .await?;
        self.state.store(STATE_DEFERRED, Ordering::Release);
        Ok(())
    }

    async fn follow_up(&self, message: ReplyMessage) -> Result<(), GatewayError> {
        if !self.reply_state().acknowledged() {
            return Err(GatewayError::NotAcknowledged);
        }

        let builder = CreateInteractionResponseFollowup::new()
            .content(message.content)
            .ephemeral(message.ephemeral);
        self.inner.create_followup(&self.http, builder).await?;
        Ok(())
    }
}

/// Reduce a raw serenity interaction to the kinds the router distinguishes.
fn map_interaction(event: serenity::all::Interaction, http: Arc<Http>) -> InboundEvent {
    match event {
        serenity::all::Interaction::Command(command) => {
            InboundEvent::Command(Arc::new(DiscordInteraction::new(command, http)))
        }
        serenity::all::Interaction::Autocomplete(_) => InboundEvent::Autocomplete,
        serenity::all::Interaction::Component(_) => InboundEvent::Component,
        serenity::all::Interaction::Modal(_) => InboundEvent::Modal,
        _ => InboundEvent::Other,
    }
}

/// Register command descriptors with the platform.
///
/// Guild-scoped registration propagates immediately; global registration
/// can take up to an hour to fan out.
async fn register_commands(
    http: &Arc<Http>,
    descriptors: &[CommandDescriptor],
    guild_id: Option<u64>,
) -> Result<(), GatewayError> {
    let builders: Vec<CreateCommand> = descriptors
        .iter()
        .map(|d| CreateCommand::new(&d.name).description(&d.description))
        .collect();
    let count = builders.len();

    match guild_id {
        Some(id) => {
            GuildId::new(id).set_commands(http, builders).await?;
            info!(count, guild_id = id, "registered guild commands");
        }
        None => {
            serenity::all::Command::set_global_commands(http, builders).await?;
            info!(count, "registered global commands");
        }
    }

    Ok(())
}

/// Serenity event handler bridging the gateway to the router's event queue.
struct Handler {
    descriptors: Vec<CommandDescriptor>,
    guild_id: Option<u64>,
    events: mpsc::Sender<InboundEvent>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "gateway connected");

        if let Err(err) = register_commands(&ctx.http, &self.descriptors, self.guild_id).await {
            error!(error = %err, "slash-command registration failed");
        }
    }

    async fn interaction_create(&self, ctx: Context, event: serenity::all::Interaction) {
        let event = map_interaction(event, Arc::clone(&ctx.http));
        if self.events.send(event).await.is_err() {
            warn!("event queue closed, dropping interaction");
        }
    }
}

/// Connect to the gateway and run until the connection fails.
///
/// Command descriptors are registered on `ready`; every inbound
/// interaction is forwarded through `events`. The token authenticates the
/// client and is never logged. An authentication failure surfaces here as
/// a connection error; no retry logic exists.
pub async fn run_gateway(
    token: &str,
    descriptors: Vec<CommandDescriptor>,
    guild_id: Option<u64>,
    events: mpsc::Sender<InboundEvent>,
) -> Result<(), GatewayError> {
    let handler = Handler {
        descriptors,
        guild_id,
        events,
    };

    let mut client = Client::builder(token, GatewayIntents::GUILDS)
        .event_handler(handler)
        .await?;
    client.start().await?;
    Ok(())
}
