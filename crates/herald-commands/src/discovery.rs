//! Command discovery from the filesystem.
//!
//! Scans a commands root for group subdirectories, loads each `.toml`
//! command manifest concurrently, resolves its executor against the
//! handler set, and populates a [`CommandRegistry`]. Per-module problems
//! are logged and skipped; only a missing root is fatal.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::handler::HandlerSet;
use crate::manifest::{parse_manifest, CommandManifest, ManifestError};
use crate::registry::{CommandRegistry, RegisteredCommand};

/// File extension recognized as a command module.
const MODULE_EXTENSION: &str = "toml";

/// Discover command modules under `root` and build a registry.
///
/// `root` must contain group subdirectories (their names are cosmetic).
/// Each group's `*.toml` files are loaded concurrently, one task per
/// file, and inserted as their loads complete — insertion order across
/// files is therefore unordered, and a name collision keeps whichever
/// module finished loading last. The returned registry is fully
/// populated: no module load is still in flight when this returns.
pub async fn load_commands(root: &Path, handlers: &HandlerSet) -> Result<CommandRegistry> {
    let module_paths = collect_module_paths(root)?;

    let mut loads = JoinSet::new();
    for path in module_paths {
        loads.spawn(load_module(path));
    }

    let mut registry = CommandRegistry::new();
    while let Some(result) = loads.join_next().await {
        let (path, outcome) = match result {
            Ok(loaded) => loaded,
            Err(err) => {
                error!(error = %err, "command load task failed");
                continue;
            }
        };

        match outcome {
            Ok(manifest) => insert_module(&mut registry, handlers, &path, manifest),
            Err(ManifestError::Shape(reason)) => {
                warn!(
                    module = %path.display(),
                    %reason,
                    "skipping command module with invalid shape"
                );
            }
            Err(ManifestError::Load(reason)) => {
                error!(
                    module = %path.display(),
                    %reason,
                    "failed to load command module"
                );
            }
        }
    }

    Ok(registry)
}

/// Enumerate `<root>/<group>/*.toml` module paths.
///
/// Group subdirectories are flat; nested directories inside a group are
/// not descended into. Non-directories at the root and files without the
/// module extension are skipped quietly.
fn collect_module_paths(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!("commands directory does not exist: {}", root.display());
    }

    let groups = std::fs::read_dir(root)
        .with_context(|| format!("failed to read commands directory: {}", root.display()))?;

    let mut paths = Vec::new();
    for group in groups.flatten() {
        let group_path = group.path();
        if !group_path.is_dir() {
            debug!(entry = %group_path.display(), "skipping non-directory at commands root");
            continue;
        }

        let entries = match std::fs::read_dir(&group_path) {
            Ok(entries) => entries,
            Err(err) => {
                error!(group = %group_path.display(), error = %err, "failed to read command group");
                continue;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == MODULE_EXTENSION) {
                paths.push(path);
            }
        }
    }

    Ok(paths)
}

/// Read and parse one command module.
async fn load_module(path: PathBuf) -> (PathBuf, Result<CommandManifest, ManifestError>) {
    let outcome = match tokio::fs::read_to_string(&path).await {
        Ok(content) => parse_manifest(&content),
        Err(err) => Err(ManifestError::Load(format!("read failed: {err}"))),
    };
    (path, outcome)
}

/// Resolve a parsed manifest against the handler set and insert it.
fn insert_module(
    registry: &mut CommandRegistry,
    handlers: &HandlerSet,
    path: &Path,
    manifest: CommandManifest,
) {
    let Some(handler) = handlers.get(&manifest.executor) else {
        warn!(
            module = %path.display(),
            executor = %manifest.executor,
            "skipping command module referencing unknown executor"
        );
        return;
    };

    let name = manifest.descriptor.name.clone();
    let displaced = registry.insert(RegisteredCommand {
        descriptor: manifest.descriptor,
        handler,
    });
    if displaced.is_some() {
        warn!(command = %name, "command module replaced an earlier registration with the same name");
    }
    debug!(command = %name, module = %path.display(), "registered command");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::handler::CommandHandler;
    use herald_gateway::Interaction;

    struct NoopHandler(&'static str);

    #[async_trait]
    impl CommandHandler for NoopHandler {
        fn name(&self) -> &str {
            self.0
        }

        async fn execute(&self, _interaction: &dyn Interaction) -> Result<()> {
            Ok(())
        }
    }

    fn handler_set() -> HandlerSet {
        let mut handlers = HandlerSet::new();
        handlers.register(Arc::new(NoopHandler("noop")));
        handlers.register(Arc::new(NoopHandler("greet")));
        handlers
    }

    fn write_module(root: &Path, group: &str, file: &str, name: &str, executor: &str) {
        let dir = root.join(group);
        std::fs::create_dir_all(&dir).unwrap();
        let manifest = format!(
            r#"
executor = "{executor}"

[descriptor]
name = "{name}"
description = "The {name} command"
"#
        );
        std::fs::write(dir.join(format!("{file}.toml")), manifest).unwrap();
    }

    #[tokio::test]
    async fn test_discovery_finds_grouped_modules() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "noop");
        write_module(tmp.path(), "utility", "echo", "echo", "greet");
        write_module(tmp.path(), "fun", "roll", "roll", "noop");

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.get("ping").is_some());
        assert!(registry.get("echo").is_some());
        assert!(registry.get("roll").is_some());
    }

    #[tokio::test]
    async fn test_discovery_skips_misshapen_modules() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "noop");

        // Missing executor attribute
        let dir = tmp.path().join("utility");
        std::fs::write(
            dir.join("broken.toml"),
            "[descriptor]\nname = \"broken\"\ndescription = \"no executor\"\n",
        )
        .unwrap();

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("broken").is_none());
    }

    #[tokio::test]
    async fn test_discovery_skips_malformed_modules() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "noop");
        std::fs::write(tmp.path().join("utility/bad.toml"), "not valid toml [[[").unwrap();

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_discovery_skips_unknown_executor() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "does-not-exist");

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_discovery_ignores_unrecognized_files() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "noop");

        // Not a module extension
        std::fs::write(tmp.path().join("utility/readme.md"), "docs").unwrap();
        // Plain file at the root, not a group
        std::fs::write(tmp.path().join("stray.toml"), "executor = \"noop\"").unwrap();

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_discovery_collision_keeps_one_entry() {
        let tmp = TempDir::new().unwrap();
        write_module(tmp.path(), "utility", "ping", "ping", "noop");
        write_module(tmp.path(), "fun", "ping-again", "ping", "greet");

        let registry = load_commands(tmp.path(), &handler_set()).await.unwrap();
        // Which module wins depends on load completion order; exactly one
        // entry survives either way.
        assert_eq!(registry.len(), 1);
        assert!(registry.get("ping").is_some());
    }

    #[tokio::test]
    async fn test_discovery_missing_root_is_fatal() {
        let result = load_commands(Path::new("/nonexistent/commands"), &handler_set()).await;
        assert!(result.is_err());
    }
}
