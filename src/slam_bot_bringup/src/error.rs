//! Error types for the slam_bot bringup

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Package '{package}' not found (searched: {searched}). Ensure the package is installed and sourced.")]
    PathResolution { package: String, searched: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Undefined launch argument: '{0}'. Did you forget to declare it?")]
    UndefinedArgument(String),

    #[error("Invalid value '{value}' for launch argument '{name}' (expected one of: {})", choices.join(", "))]
    InvalidChoice {
        name: String,
        value: String,
        choices: Vec<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LaunchError {
    pub(crate) fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LaunchError::FileAccess {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LaunchError>;
