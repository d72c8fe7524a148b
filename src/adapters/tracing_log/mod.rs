// Tracing log adapter - Subscriber setup for structured logging

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSettings};
use crate::domain::errors::*;

/// Installs the global tracing subscriber
pub struct TracingLogAdapter;

impl TracingLogAdapter {
    /// Build the filter: `RUST_LOG` wins, else the configured level
    pub fn filter(level: &str) -> Result<EnvFilter, DomainError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(level)
            .map_err(|e| DomainError::BadArgs(format!("Invalid log level '{}': {}", level, e)))
    }

    /// Initialise logging once. Later calls are no-ops, which keeps tests
    /// that share a process from fighting over the global subscriber.
    pub fn init(settings: &LoggingSettings) -> Result<(), DomainError> {
        let filter = Self::filter(&settings.level)?;
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false);

        let _ = match settings.format {
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        Ok(())
    }
}
