use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CraftError {
    #[error("Invalid configuration format: {source}")]
    InvalidFormat { source: serde_json::Error },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("No home directory found; pass --script-path and --config-path explicitly")]
    NoHomeDir,
}
