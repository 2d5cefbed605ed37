//! Error types for column configuration

use std::path::PathBuf;
use thiserror::Error;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while loading column configuration or catalogs
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Asset type name not recognized
    #[error("unknown asset type: {name}")]
    UnknownAssetType { name: String },

    /// Configuration file could not be read
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}
