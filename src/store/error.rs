use std::path::PathBuf;
use thiserror::Error;

use crate::activation::ActivationError;

/// Errors from profile store operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Invalid profile index {index} ({len} profiles configured)")]
    InvalidIndex { index: i64, len: usize },

    #[error("No profile matches '{0}'")]
    NotFound(String),

    #[error("Cannot delete active profile '{name}'; switch to another profile first")]
    ActiveProfile { name: String },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read profiles file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profiles file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize profiles: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write profiles file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to lock profiles file '{path}': {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error("Profile operation did not complete: {0}")]
    Worker(String),
}
