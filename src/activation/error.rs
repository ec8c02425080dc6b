use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while projecting a profile onto the host.
#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("No profile to apply; switch to a profile first")]
    MissingProfile,

    #[error("Could not determine the home directory")]
    HomeDirUnavailable,

    #[error("Failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to write settings file '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set {var}: {reason}")]
    EnvVar { var: String, reason: String },
}
