// Domain errors - Failure taxonomy for a composition run

use thiserror::Error;

/// Domain-specific error types
///
/// Every failure is fatal for the run that produced it. The only automatic
/// retry in the crate is the hardware to software encoder fallback, which
/// happens before `EncodeFailed` is ever constructed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// A referenced clip or audio file does not exist
    #[error("Input file not found: {path}")]
    InputMissing { path: String },

    /// Neither probing strategy produced a usable duration
    #[error("Could not determine duration of {path}: {reason}")]
    DurationUnavailable { path: String, reason: String },

    /// Fewer clips than the composition requires
    #[error("Not enough clips: got {found}, need at least {required}")]
    InsufficientClips { found: usize, required: usize },

    /// Every encoder attempt exited non-zero
    #[error("Encoding failed after {attempts} attempt(s):\n{diagnostics}")]
    EncodeFailed { attempts: usize, diagnostics: String },

    /// Invalid arguments provided
    #[error("Bad arguments: {0}")]
    BadArgs(String),

    /// An external tool could not be started at all
    #[error("Failed to launch {program}: {reason}")]
    ProcessLaunch { program: String, reason: String },

    /// File system operation failed
    #[error("File system error: {0}")]
    FsFail(String),

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Short machine-friendly name of the failure class
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InputMissing { .. } => "input_missing",
            DomainError::DurationUnavailable { .. } => "duration_unavailable",
            DomainError::InsufficientClips { .. } => "insufficient_clips",
            DomainError::EncodeFailed { .. } => "encode_failed",
            DomainError::BadArgs(_) => "bad_args",
            DomainError::ProcessLaunch { .. } => "process_launch",
            DomainError::FsFail(_) => "fs_fail",
            DomainError::ConfigError(_) => "config_error",
        }
    }
}
