//! Error types for scadastore

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scadastore
#[derive(Debug, Error)]
pub enum ScadaError {
    #[error("Not a scadastore workspace: {0}")]
    NotWorkspace(PathBuf),

    #[error("Configuration not found: {0}")]
    NotFound(String),

    #[error("Failed to read stored configurations: {0}")]
    StorageRead(String),

    #[error("Failed to write stored configurations: {0}")]
    StorageWrite(String),

    #[error("Failed to read import file {}: {reason}", .path.display())]
    ImportRead { path: PathBuf, reason: String },

    #[error("Failed to parse configuration file: {0}")]
    ImportParse(String),

    #[error("Invalid configuration format: {0}")]
    InvalidConfiguration(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("No endpoint for resource: {0}")]
    UnknownResource(String),

    #[error("Request failed with status: {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl ScadaError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ScadaError::NotWorkspace(_) => 2,
            ScadaError::NotFound(_) => 3,
            ScadaError::ImportRead { .. }
            | ScadaError::ImportParse(_)
            | ScadaError::InvalidConfiguration(_) => 4,
            ScadaError::Unauthenticated => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            ScadaError::NotWorkspace(path) => {
                format!(
                    "Not a scadastore workspace: {}\n\n\
                    Suggestions:\n\
                    • Run 'scadastore init' in this directory to create a workspace\n\
                    • Navigate to an existing workspace directory\n\
                    • Set SCADA_ROOT environment variable to your workspace path",
                    path.display()
                )
            }
            ScadaError::NotFound(name) => {
                format!(
                    "No configuration named '{}'\n\n\
                    Suggestions:\n\
                    • Names are case-sensitive\n\
                    • Use 'scadastore list' to see saved configurations",
                    name
                )
            }
            ScadaError::InvalidConfiguration(msg) => {
                format!(
                    "Invalid configuration format: {}\n\n\
                    A configuration file needs at least:\n\
                    • name (string), timestamp (number), version (string)\n\
                    • canvas with numeric scale, panX, panY\n\
                    • components and groups arrays",
                    msg
                )
            }
            ScadaError::Unauthenticated => "Not authenticated\n\n\
                Suggestions:\n\
                • Log in with: scadastore login <auth-response.json>"
                .to_string(),
            ScadaError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Example: scadastore config export_dir exports",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using ScadaError
pub type Result<T> = std::result::Result<T, ScadaError>;
