//! Configuration error types.

use std::path::PathBuf;

/// Failure to load, store or validate a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot encode config: {0}")]
    Encode(#[source] ron::Error),

    /// A generator preset value is outside its accepted range.
    #[error("invalid generator preset: `{field}` {reason}")]
    InvalidPreset {
        field: &'static str,
        reason: String,
    },
}
