//! Core executor types: the handler trait and the handler set.
//!
//! Every executor implements [`CommandHandler`]: a stable name that
//! command manifests reference, and an async `execute` taking the
//! interaction context. The [`HandlerSet`] is the build-time registration
//! list the loader resolves manifests against.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use herald_gateway::Interaction;

/// Trait that all command executors must implement.
///
/// Handlers are compiled into the binary and collected into a
/// [`HandlerSet`]; command manifests bind to them by name. `execute`
/// performs its work through the interaction's reply methods and returns
/// no meaningful value, only side effects.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Stable handler name referenced by command manifests.
    fn name(&self) -> &str;

    /// Execute against one interaction.
    async fn execute(&self, interaction: &dyn Interaction) -> Result<()>;
}

/// The set of compiled-in executors, keyed by handler name.
#[derive(Default)]
pub struct HandlerSet {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl HandlerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add a handler. Overwrites any previous handler with the same name.
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Look up a handler by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// All registered handler names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
