//! Command discovery, registration, and routing for Herald.
//!
//! Commands are declared as TOML manifests in a grouped directory tree,
//! bound to compiled-in executors, collected into a [`CommandRegistry`],
//! and dispatched by the [`CommandRouter`].
//!
//! # Architecture
//!
//! - [`handler`]: [`CommandHandler`] trait and the [`HandlerSet`]
//!   build-time registration list
//! - [`builtins`]: built-in executors (ping, uptime, version)
//! - [`manifest`]: command manifest parsing and shape validation
//! - [`discovery`]: filesystem scanning and concurrent module loading
//! - [`registry`]: the name-to-definition lookup table
//! - [`router`]: inbound event filtering and dispatch with error containment

pub mod builtins;
pub mod discovery;
pub mod handler;
pub mod manifest;
pub mod registry;
pub mod router;

pub use builtins::builtin_handlers;
pub use discovery::load_commands;
pub use handler::{CommandHandler, HandlerSet};
pub use manifest::{parse_manifest, CommandManifest, ManifestError};
pub use registry::{CommandRegistry, RegisteredCommand};
pub use router::{CommandRouter, RouteOutcome};
