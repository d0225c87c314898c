//! Error types shared across the bot.

use std::fmt;

/// Errors that can stop a command or the whole process.
///
/// Only `Configuration` is fatal; storage failures are converted into a
/// generic reply by the command handler.
#[derive(Debug)]
pub enum HeraldError {
    /// A required setting is missing or unusable at startup.
    Configuration(String),
    /// The subscriber store could not complete an operation.
    Storage(rusqlite::Error),
}

impl fmt::Display for HeraldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeraldError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            HeraldError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for HeraldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HeraldError::Configuration(_) => None,
            HeraldError::Storage(e) => Some(e),
        }
    }
}

impl From<rusqlite::Error> for HeraldError {
    fn from(e: rusqlite::Error) -> Self {
        HeraldError::Storage(e)
    }
}
