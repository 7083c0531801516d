//! Error types for wordrill

use std::io;
use thiserror::Error;

/// Main error type for wordrill
#[derive(Error, Debug)]
pub enum WordrillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    /// The word collection could not be read or parsed
    #[error("Failed to load word list {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for wordrill operations
pub type Result<T> = std::result::Result<T, WordrillError>;

impl From<String> for WordrillError {
    fn from(s: String) -> Self {
        WordrillError::Other(s)
    }
}

impl From<&str> for WordrillError {
    fn from(s: &str) -> Self {
        WordrillError::Other(s.to_string())
    }
}
