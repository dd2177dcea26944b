//! Command descriptor: the registration-facing metadata of a command.
//!
//! The descriptor carries the fields the platform's command-registration
//! API requires (a name and a description). Validation enforces the
//! platform's published constraints before a command ever reaches the
//! registry.

use serde::{Deserialize, Serialize};

use crate::HeraldError;

/// Maximum allowed length for a command name.
const MAX_NAME_LEN: usize = 32;

/// Maximum allowed length for a command description.
const MAX_DESCRIPTION_LEN: usize = 100;

/// Registration metadata for one command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// Unique command name (lowercase alphanumerics, hyphens, and
    /// underscores; 1-32 chars).
    pub name: String,
    /// One-line description shown in the platform's command picker.
    pub description: String,
}

/// Validate a descriptor against the platform's registration constraints.
///
/// Checks:
/// - Name is 1-32 chars of lowercase alphanumerics, hyphens, or underscores
/// - Description is non-empty and at most 100 chars
pub fn validate_descriptor(descriptor: &CommandDescriptor) -> Result<(), HeraldError> {
    if descriptor.name.is_empty() {
        return Err(HeraldError::Descriptor("name must not be empty".into()));
    }
    if descriptor.name.len() > MAX_NAME_LEN {
        return Err(HeraldError::Descriptor(format!(
            "name exceeds maximum length of {MAX_NAME_LEN} characters: {}",
            descriptor.name
        )));
    }
    if !descriptor
        .name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(HeraldError::Descriptor(format!(
            "name must contain only lowercase alphanumerics, hyphens, and underscores: {}",
            descriptor.name
        )));
    }

    if descriptor.description.is_empty() {
        return Err(HeraldError::Descriptor(format!(
            "description must not be empty for command '{}'",
            descriptor.name
        )));
    }
    if descriptor.description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(HeraldError::Descriptor(format!(
            "description exceeds maximum length of {MAX_DESCRIPTION_LEN} characters for command '{}'",
            descriptor.name
        )));
    }

    Ok(())
}
