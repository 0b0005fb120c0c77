use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid module identifier (expected group:name): {0}")]
    InvalidModule(String),

    #[error("Invalid module version identifier (expected group:name:version): {0}")]
    InvalidModuleVersion(String),

    #[error("Empty segment in coordinate: {0}")]
    EmptySegment(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeUnitError {
    #[error("Unknown time unit: {0}")]
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
