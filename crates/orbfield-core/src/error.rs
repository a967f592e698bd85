//! Error types for Orbfield

use thiserror::Error;

/// The main error type for Orbfield operations
///
/// Protocol misuse never surfaces here; the controller absorbs it. These are
/// the failures at the edges: configuration files and worker plumbing.
#[derive(Debug, Error)]
pub enum OrbfieldError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Invalid enum value: {value} is not one of {allowed:?}")]
    InvalidEnumValue {
        value: String,
        allowed: Vec<String>,
    },

    #[error("Worker disconnected: {0}")]
    WorkerDisconnected(String),

    #[error("Worker error: {0}")]
    WorkerError(String),
}

/// Result type alias for Orbfield operations
pub type Result<T> = std::result::Result<T, OrbfieldError>;

impl From<toml::ser::Error> for OrbfieldError {
    fn from(err: toml::ser::Error) -> Self {
        OrbfieldError::TomlSerError(err.to_string())
    }
}
