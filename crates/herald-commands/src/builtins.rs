//! Built-in executors: ping, uptime, version.
//!
//! These are the handlers command manifests can bind to out of the box.
//! New executors are added here (or registered by the embedding binary);
//! manifests alone cannot introduce new behavior.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;

use herald_gateway::{Interaction, ReplyMessage};

use super::handler::{CommandHandler, HandlerSet};

/// Build the default handler set with all built-in executors.
pub fn builtin_handlers() -> HandlerSet {
    let mut handlers = HandlerSet::new();
    handlers.register(Arc::new(PingHandler));
    handlers.register(Arc::new(UptimeHandler::new()));
    handlers.register(Arc::new(VersionHandler));
    handlers
}

// ---------------------------------------------------------------------------
// PingHandler
// ---------------------------------------------------------------------------

/// Replies with "Pong!".
struct PingHandler;

#[async_trait]
impl CommandHandler for PingHandler {
    fn name(&self) -> &str {
        "ping"
    }

    async fn execute(&self, interaction: &dyn Interaction) -> Result<()> {
        interaction.reply(ReplyMessage::text("Pong!")).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// UptimeHandler
// ---------------------------------------------------------------------------

/// Reports how long the process has been running.
pub struct UptimeHandler {
    started_at: Instant,
}

impl UptimeHandler {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
        }
    }
}

impl Default for UptimeHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandHandler for UptimeHandler {
    fn name(&self) -> &str {
        "uptime"
    }

    async fn execute(&self, interaction: &dyn Interaction) -> Result<()> {
        let secs = self.started_at.elapsed().as_secs();
        let text = format!(
            "Up for {}h {}m {}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        );
        interaction.reply(ReplyMessage::text(text)).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// VersionHandler
// ---------------------------------------------------------------------------

/// Reports the running Herald version, visible only to the invoker.
struct VersionHandler;

#[async_trait]
impl CommandHandler for VersionHandler {
    fn name(&self) -> &str {
        "version"
    }

    async fn execute(&self, interaction: &dyn Interaction) -> Result<()> {
        let text = format!("herald {}", env!("CARGO_PKG_VERSION"));
        interaction.reply(ReplyMessage::ephemeral(text)).await?;
        Ok(())
    }
}
