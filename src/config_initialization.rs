//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::adapters::TomlConfigAdapter;
use crate::cli::{Cli, Commands};
use crate::config::{AppConfig, LogFormat};
use crate::domain::errors::DomainError;

pub const ENV_FFMPEG: &str = "STORYREEL_FFMPEG";
pub const ENV_FFPROBE: &str = "STORYREEL_FFPROBE";
pub const ENV_LOG_LEVEL: &str = "STORYREEL_LOG_LEVEL";
pub const ENV_HARDWARE: &str = "STORYREEL_HARDWARE";

/// Build the effective configuration following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> Result<AppConfig> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = TomlConfigAdapter::discover(cli.config.as_deref(), &cwd)
        .context("Failed to load configuration file")?;

    apply_environment(&mut config, |key| std::env::var(key).ok())?;
    apply_cli_overrides(&mut config, cli)?;
    config.validate()?;
    Ok(config)
}

/// Override file values with environment variables read through `lookup`
pub fn apply_environment<F>(config: &mut AppConfig, lookup: F) -> Result<(), DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(ffmpeg) = lookup(ENV_FFMPEG) {
        debug!("Environment override: {} = {}", ENV_FFMPEG, ffmpeg);
        config.tools.ffmpeg = PathBuf::from(ffmpeg);
    }
    if let Some(ffprobe) = lookup(ENV_FFPROBE) {
        debug!("Environment override: {} = {}", ENV_FFPROBE, ffprobe);
        config.tools.ffprobe = PathBuf::from(ffprobe);
    }
    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        debug!("Environment override: {} = {}", ENV_LOG_LEVEL, level);
        config.logging.level = level;
    }
    if let Some(hardware) = lookup(ENV_HARDWARE) {
        debug!("Environment override: {} = {}", ENV_HARDWARE, hardware);
        config.encode.hardware_enabled = parse_flag(ENV_HARDWARE, &hardware)?;
    }
    Ok(())
}

/// Override with global flags and command-specific switches
pub fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) -> Result<(), DomainError> {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = LogFormat::parse(format)?;
    }
    if let Some(ffmpeg) = &cli.ffmpeg {
        config.tools.ffmpeg = ffmpeg.clone();
    }
    if let Some(ffprobe) = &cli.ffprobe {
        config.tools.ffprobe = ffprobe.clone();
    }
    if let Commands::Compose(args) = &cli.command {
        if args.no_hardware {
            config.encode.hardware_enabled = false;
        }
    }
    Ok(())
}

fn parse_flag(name: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::ConfigError(format!(
            "{} must be a boolean, got '{}'",
            name, value
        ))),
    }
}
