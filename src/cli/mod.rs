//! CLI module for storyreel
//!
//! This module handles command-line argument parsing and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::container::AppContainer;
use crate::config::AppConfig;

pub mod args;
pub mod commands;

pub use args::{ComposeArgs, PlanArgs, ProbeArgs, RequestArgs};

/// storyreel - narrated short-video compositor
///
/// Cuts a set of clips to fit a narration track, normalizes them to one frame
/// size, overlays timed subtitles and encodes the result with ffmpeg.
#[derive(Parser, Debug)]
#[command(name = "storyreel")]
#[command(about = "Compose narrated, subtitled videos from a set of clips")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: ./storyreel.toml when present)
    #[arg(long, global = true, env = "STORYREEL_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Logging level or filter directive
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// ffmpeg executable
    #[arg(long, global = true, value_name = "PATH")]
    pub ffmpeg: Option<PathBuf>,

    /// ffprobe executable
    #[arg(long, global = true, value_name = "PATH")]
    pub ffprobe: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose and encode the final video
    Compose(ComposeArgs),
    /// Show the filter graph and ffmpeg commands without encoding
    Plan(PlanArgs),
    /// Print the duration of a media file
    Probe(ProbeArgs),
}

/// Dispatch the parsed command
pub fn run(cli: Cli, container: &dyn AppContainer, config: &AppConfig) -> Result<()> {
    match cli.command {
        Commands::Compose(args) => commands::compose(container, config, args),
        Commands::Plan(args) => commands::plan(container, config, args),
        Commands::Probe(args) => commands::probe(container, args),
    }
}
