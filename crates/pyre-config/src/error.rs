use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or persisting the viewer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] ron::Error),
}
