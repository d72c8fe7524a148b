//! Error handling module for StoryReel

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for StoryReel operations
#[derive(Error, Debug)]
pub enum StoryReelError {
    /// Composition failure from the domain layer
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Configuration file could not be parsed
    #[error("Invalid configuration file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for StoryReel operations
pub type StoryReelResult<T> = std::result::Result<T, StoryReelError>;
