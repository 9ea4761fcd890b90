//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid Chart.yaml: {message}")]
    InvalidChart { message: String },

    #[error("could not access {path}: {message}")]
    FileAccess { path: String, message: String },

    #[error("values merge error: {message}")]
    ValuesMerge { message: String },

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid version: {0}")]
    InvalidVersion(#[from] semver::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
