//! Core types shared across all Herald crates.
//!
//! Defines the daemon configuration, the command descriptor, and the
//! shared error type used by the command loader, the gateway adapter,
//! and the daemon binary.

pub mod config;
pub mod descriptor;
pub mod error;

pub use config::{discord_token, HeraldConfig, CONFIG_FILENAME, TOKEN_ENV_VAR};
pub use descriptor::{validate_descriptor, CommandDescriptor};
pub use error::HeraldError;
