//! Error types for the voice selector

use std::io;
use thiserror::Error;

/// Main error type for the voice selector
#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech host error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for voice selector operations
pub type Result<T> = std::result::Result<T, SelectorError>;

impl From<String> for SelectorError {
    fn from(s: String) -> Self {
        SelectorError::Other(s)
    }
}

impl From<&str> for SelectorError {
    fn from(s: &str) -> Self {
        SelectorError::Other(s.to_string())
    }
}
