//! Error types for modboard-core
//!
//! Derivations over the metrics store are total; only I/O, config loading
//! and command parsing produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for modboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk directory {path}: {message}")]
    Walk { path: PathBuf, message: String },

    // ===================
    // Input Errors
    // ===================
    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Unknown command: {name}")]
    UnknownCommand { name: String },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration in {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    // ===================
    // Export Errors
    // ===================
    #[error("Failed to parse snapshot: {message}")]
    SnapshotParse {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },
}

impl CoreError {
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Actionable hint shown next to the error in interactive mode
    pub fn suggestion(&self) -> Option<String> {
        match self {
            CoreError::FileRead { path, .. } => {
                Some(format!("Check permissions: ls -l {}", path.display()))
            }
            CoreError::UnknownCommand { .. } => Some("Type 'help' to list commands".to_string()),
            CoreError::InvalidArgument { .. } => {
                Some("Counts must be non-negative integers".to_string())
            }
            CoreError::InvalidConfig { path, .. } => {
                Some(format!("Validate TOML syntax in {}", path.display()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = CoreError::invalid_argument("-3", "count must be non-negative");
        assert_eq!(
            err.to_string(),
            "Invalid argument '-3': count must be non-negative"
        );
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn test_snapshot_parse_has_no_suggestion() {
        let err = CoreError::SnapshotParse {
            message: "missing schema".to_string(),
            source: None,
        };
        assert!(err.suggestion().is_none());
    }
}
