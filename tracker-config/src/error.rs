//! Error types for tracker settings

use thiserror::Error;

/// Result type for settings operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Settings-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings could not be parsed or extracted
    #[error("Failed to parse settings: {source}")]
    ParseError { source: Box<figment::Error> },

    /// Invalid settings value
    #[error("Invalid settings value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Settings file format not supported
    #[error("Unsupported settings file format: {format}")]
    UnsupportedFormat { format: String },
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::ParseError {
            source: Box::new(error),
        }
    }
}
