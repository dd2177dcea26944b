//! Error types shared across all Herald crates.

/// Errors that can occur across the Herald runtime.
///
/// Each variant corresponds to a different subsystem: configuration,
/// command loading, descriptor validation, or the platform gateway.
#[derive(Debug, thiserror::Error)]
pub enum HeraldError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("command loader error: {0}")]
    Loader(String),

    #[error("invalid command descriptor: {0}")]
    Descriptor(String),

    #[error("gateway error: {0}")]
    Gateway(String),
}
