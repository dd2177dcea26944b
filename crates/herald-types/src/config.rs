//! Daemon configuration: file, environment overrides, and the client token.
//!
//! Configuration merges in priority order (later overrides earlier):
//! 1. Built-in defaults ([`HeraldConfig::default()`])
//! 2. `herald.toml` in the working directory (or an explicit path)
//! 3. `HERALD_*` environment variables
//!
//! The client token is deliberately not part of the config file; it is
//! read from the `DISCORD_TOKEN` environment variable and its value is
//! never logged.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::HeraldError;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "herald.toml";

/// Environment variable holding the client authentication token.
pub const TOKEN_ENV_VAR: &str = "DISCORD_TOKEN";

/// Environment variable overriding the commands directory.
const COMMANDS_DIR_ENV_VAR: &str = "HERALD_COMMANDS_DIR";

/// Environment variable overriding the registration guild.
const GUILD_ID_ENV_VAR: &str = "HERALD_GUILD_ID";

/// Maximum config file size in bytes. Larger files are rejected.
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HeraldConfig {
    /// Root directory scanned for command manifests.
    pub commands_dir: PathBuf,
    /// Guild to register commands against. `None` registers globally.
    pub guild_id: Option<u64>,
    /// Capacity of the gateway-to-router event queue.
    pub event_queue_depth: usize,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            commands_dir: PathBuf::from("commands"),
            guild_id: None,
            event_queue_depth: 64,
        }
    }
}

impl HeraldConfig {
    /// Load configuration from `path` (or [`CONFIG_FILENAME`] if `None`),
    /// then apply `HERALD_*` environment overrides.
    ///
    /// A missing default file yields the built-in defaults; an explicitly
    /// given path must exist. A malformed or oversized file is a fatal
    /// configuration error.
    pub fn load(path: Option<&Path>) -> Result<Self, HeraldError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILENAME);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a specific TOML file.
    pub fn from_file(path: &Path) -> Result<Self, HeraldError> {
        let metadata = std::fs::metadata(path)
            .map_err(|e| HeraldError::Config(format!("failed to stat {}: {e}", path.display())))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(HeraldError::Config(format!(
                "config file too large: {} ({} bytes, max {MAX_CONFIG_FILE_SIZE})",
                path.display(),
                metadata.len()
            )));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| HeraldError::Config(format!("failed to read {}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| HeraldError::Config(format!("failed to parse {}: {e}", path.display())))
    }

    /// Apply `HERALD_COMMANDS_DIR` and `HERALD_GUILD_ID` overrides.
    fn apply_env_overrides(&mut self) -> Result<(), HeraldError> {
        if let Ok(value) = std::env::var(COMMANDS_DIR_ENV_VAR) {
            if !value.trim().is_empty() {
                self.commands_dir = PathBuf::from(value);
            }
        }

        if let Ok(value) = std::env::var(GUILD_ID_ENV_VAR) {
            let value = value.trim();
            if !value.is_empty() {
                let id = value.parse::<u64>().map_err(|_| {
                    HeraldError::Config(format!(
                        "{GUILD_ID_ENV_VAR} must be a numeric guild id, got: {value}"
                    ))
                })?;
                self.guild_id = Some(id);
            }
        }

        Ok(())
    }

    /// Reject values the runtime cannot operate with.
    fn validate(&self) -> Result<(), HeraldError> {
        if self.guild_id == Some(0) {
            return Err(HeraldError::Config("guild_id must be nonzero".into()));
        }
        if self.event_queue_depth == 0 {
            return Err(HeraldError::Config(
                "event_queue_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Read the client token from the environment.
///
/// The returned value authenticates the gateway connection and must never
/// appear in logs. A missing or empty token is fatal: the daemon cannot
/// connect without one and no retry logic exists.
pub fn discord_token() -> Result<String, HeraldError> {
    match std::env::var(TOKEN_ENV_VAR) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(HeraldError::Config(format!(
            "{TOKEN_ENV_VAR} is not set; cannot authenticate the client"
        ))),
    }
}
