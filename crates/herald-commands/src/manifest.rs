//! Command manifest parsing and shape validation.
//!
//! A command module is a TOML file carrying exactly two required
//! attributes: a `[descriptor]` table (registration metadata) and an
//! `executor` key naming a compiled-in handler. Shape violations (missing
//! attributes, invalid descriptor fields) are distinguished from load
//! failures (I/O, syntax) so the loader can log each at the right level.

use serde::Deserialize;
use thiserror::Error;

use herald_types::{validate_descriptor, CommandDescriptor};

/// Why a command module was rejected.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The module is missing a required attribute or carries invalid
    /// descriptor fields. Logged as a warning; the module is skipped.
    #[error("{0}")]
    Shape(String),

    /// The module could not be read or parsed at all. Logged as an
    /// error; the module is skipped.
    #[error("{0}")]
    Load(String),
}

/// A validated command manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandManifest {
    /// Registration metadata for the command.
    pub descriptor: CommandDescriptor,
    /// Name of the compiled-in handler that executes the command.
    pub executor: String,
}

/// Raw manifest as parsed. Every field is optional so shape checks can
/// report exactly what is missing instead of failing inside the
/// deserializer.
#[derive(Debug, Deserialize)]
struct RawManifest {
    descriptor: Option<RawDescriptor>,
    executor: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDescriptor {
    name: Option<String>,
    description: Option<String>,
}

/// Parse and shape-check a command manifest from TOML.
pub fn parse_manifest(toml_str: &str) -> Result<CommandManifest, ManifestError> {
    let raw: RawManifest =
        toml::from_str(toml_str).map_err(|e| ManifestError::Load(format!("invalid TOML: {e}")))?;

    let descriptor = raw
        .descriptor
        .ok_or_else(|| ManifestError::Shape("missing required [descriptor] table".into()))?;
    let executor = raw
        .executor
        .ok_or_else(|| ManifestError::Shape("missing required executor attribute".into()))?;
    if executor.trim().is_empty() {
        return Err(ManifestError::Shape("executor must not be empty".into()));
    }

    let name = descriptor
        .name
        .ok_or_else(|| ManifestError::Shape("descriptor is missing required name".into()))?;
    let description = descriptor
        .description
        .ok_or_else(|| ManifestError::Shape("descriptor is missing required description".into()))?;

    let descriptor = CommandDescriptor { name, description };
    validate_descriptor(&descriptor).map_err(|e| ManifestError::Shape(e.to_string()))?;

    Ok(CommandManifest {
        descriptor,
        executor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_toml() -> &'static str {
        r#"
executor = "ping"

[descriptor]
name = "ping"
description = "Replies with Pong!"
"#
    }

    #[test]
    fn test_manifest_parse_valid() {
        let manifest = parse_manifest(valid_toml()).unwrap();
        assert_eq!(manifest.descriptor.name, "ping");
        assert_eq!(manifest.descriptor.description, "Replies with Pong!");
        assert_eq!(manifest.executor, "ping");
    }

    #[test]
    fn test_manifest_ignores_unknown_fields() {
        let manifest = parse_manifest(
            r#"
executor = "ping"
cooldown = 5

[descriptor]
name = "ping"
description = "Replies with Pong!"
nsfw = false
"#,
        )
        .unwrap();
        assert_eq!(manifest.descriptor.name, "ping");
    }

    #[test]
    fn test_manifest_missing_descriptor_is_shape_error() {
        let err = parse_manifest("executor = \"ping\"\n").unwrap_err();
        assert!(
            matches!(err, ManifestError::Shape(_)),
            "expected shape error, got: {err:?}"
        );
        assert!(err.to_string().contains("[descriptor]"));
    }

    #[test]
    fn test_manifest_missing_executor_is_shape_error() {
        let err = parse_manifest(
            r#"
[descriptor]
name = "ping"
description = "Replies with Pong!"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Shape(_)));
        assert!(err.to_string().contains("executor"));
    }

    #[test]
    fn test_manifest_missing_descriptor_fields_are_shape_errors() {
        let err = parse_manifest(
            r#"
executor = "ping"

[descriptor]
description = "no name here"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Shape(_)));
        assert!(err.to_string().contains("name"));

        let err = parse_manifest(
            r#"
executor = "ping"

[descriptor]
name = "ping"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Shape(_)));
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn test_manifest_empty_executor_is_shape_error() {
        let err = parse_manifest(
            r#"
executor = "  "

[descriptor]
name = "ping"
description = "Replies with Pong!"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Shape(_)));
    }

    #[test]
    fn test_manifest_invalid_descriptor_is_shape_error() {
        let err = parse_manifest(
            r#"
executor = "ping"

[descriptor]
name = "Not Valid"
description = "Replies with Pong!"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Shape(_)));
        assert!(err.to_string().contains("lowercase"));
    }

    #[test]
    fn test_manifest_bad_toml_is_load_error() {
        let err = parse_manifest("not valid toml [[[").unwrap_err();
        assert!(
            matches!(err, ManifestError::Load(_)),
            "expected load error, got: {err:?}"
        );
    }
}
