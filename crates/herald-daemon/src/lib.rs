//! Herald daemon: the long-running command-dispatch process.
//!
//! Startup order is deliberate: the command registry is fully populated
//! from the filesystem before the gateway client is constructed, so an
//! early interaction can never observe a half-loaded registry. Inbound
//! events are pumped from the gateway through a bounded queue and each
//! one is routed on its own task.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use herald_commands::{builtin_handlers, load_commands, CommandRouter};
use herald_gateway::{run_gateway, InboundEvent};
use herald_types::{discord_token, HeraldConfig};

/// Run the daemon until the gateway connection fails.
pub async fn run(config: HeraldConfig) -> Result<()> {
    let handlers = builtin_handlers();
    let registry = Arc::new(
        load_commands(&config.commands_dir, &handlers)
            .await
            .context("command discovery failed")?,
    );

    if registry.is_empty() {
        warn!(dir = %config.commands_dir.display(), "no command modules discovered");
    } else {
        info!(count = registry.len(), "command registry populated");
    }

    let token = discord_token()?;
    let descriptors = registry.descriptors();

    let (event_tx, event_rx) = mpsc::channel(config.event_queue_depth);
    let router = CommandRouter::new(registry);
    let pump = tokio::spawn(pump_events(event_rx, router));

    let result = run_gateway(&token, descriptors, config.guild_id, event_tx)
        .await
        .context("gateway connection failed");

    pump.abort();
    result
}

/// Receive inbound events and route each on its own task so a slow
/// executor does not hold up later interactions.
async fn pump_events(mut events: mpsc::Receiver<InboundEvent>, router: CommandRouter) {
    while let Some(event) = events.recv().await {
        let router = router.clone();
        tokio::spawn(async move {
            router.route(event).await;
        });
    }
}
