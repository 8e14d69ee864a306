use std::path::PathBuf;

use thiserror::Error;

/// Failures on the I/O side of the crate. Segmentation itself cannot fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write output {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}
