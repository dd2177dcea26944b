//! Command registry: the name-to-definition lookup table.
//!
//! Populated once by discovery at startup, then shared read-only with the
//! router. Insertion uses map-overwrite semantics: a colliding name
//! replaces the earlier entry and the displaced definition is returned to
//! the caller for logging.

use std::collections::HashMap;
use std::sync::Arc;

use herald_types::CommandDescriptor;

use crate::handler::CommandHandler;

/// One registered command: registration metadata plus its executor.
#[derive(Clone)]
pub struct RegisteredCommand {
    /// Registration metadata (name, description).
    pub descriptor: CommandDescriptor,
    /// The executor bound to this command.
    pub handler: Arc<dyn CommandHandler>,
}

/// Registry of command definitions, keyed by descriptor name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, RegisteredCommand>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Insert a command, returning the displaced definition if the name
    /// was already registered (last insertion wins).
    pub fn insert(&mut self, command: RegisteredCommand) -> Option<RegisteredCommand> {
        self.commands
            .insert(command.descriptor.name.clone(), command)
    }

    /// Look up a command by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredCommand> {
        self.commands.get(name)
    }

    /// All descriptors, sorted by name, for platform registration.
    pub fn descriptors(&self) -> Vec<CommandDescriptor> {
        let mut descriptors: Vec<CommandDescriptor> = self
            .commands
            .values()
            .map(|c| c.descriptor.clone())
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the registry holds no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
