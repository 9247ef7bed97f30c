use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid class selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Failed to publish '{name}': {reason}")]
    Publish { name: String, reason: String },
}
