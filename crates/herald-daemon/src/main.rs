use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use herald_types::HeraldConfig;

/// Herald -- slash-command dispatch daemon.
///
/// A long-running process with no subcommands: it loads the command
/// registry, connects to the gateway, and serves until terminated.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Path to the configuration file (defaults to ./herald.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the commands directory from config and environment.
    #[arg(long)]
    commands_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with env filter (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = HeraldConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.commands_dir {
        config.commands_dir = dir;
    }

    herald_daemon::run(config).await
}
