//! Error types for graviton-history
//!
//! All fallible modules use `HistoryResult<T>` as their return type. The
//! history store itself never surfaces errors from `record`/`search`; these
//! variants cover configuration, parsing and the CLI.

use crate::input::ParseError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for graviton-history operations
pub type HistoryResult<T> = Result<T, HistoryError>;

/// All errors that can occur in graviton-history
#[derive(Error, Debug)]
pub enum HistoryError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Resolution data errors
    #[error("Invalid artifact coordinate '{input}': {reason}")]
    InvalidCoordinate { input: String, reason: String },

    #[error("Could not parse input: {0}")]
    InputParse(#[from] ParseError),

    // Persistence errors
    #[error("History writer is no longer running")]
    WriterClosed,

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("{0}")]
    User(String),
}

impl HistoryError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid coordinate error
    pub fn coordinate(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidCoordinate { .. } => {
                Some("Use group:name:version, e.g. com.example:app:1.0")
            }
            Self::ConfigInvalid { .. } => Some("Run: graviton-history config init --force"),
            Self::InputParse(ParseError::UnbalancedQuotes) => Some("Check for a missing quote"),
            _ => None,
        }
    }
}
