//! storyreel - narrated short-video compositor
//!
//! # Usage
//!
//! ```bash
//! storyreel compose --clip a.mp4 --clip b.mp4 --narration voice.mp3 \
//!     --transcript "First line. Second line." --aspect 9:16 --output final.mp4
//! storyreel plan --clip a.mp4 --narration voice.mp3 --duration 20 --output final.mp4 --json
//! storyreel probe --input voice.mp3
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use storyreel::adapters::TracingLogAdapter;
use storyreel::app::DefaultAppContainer;
use storyreel::cli::{self, Cli};
use storyreel::config_initialization::initialize_configuration_hierarchy;

/// Main entry point for the storyreel CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = initialize_configuration_hierarchy(&cli)?;
    TracingLogAdapter::init(&config.logging)?;
    debug!("Effective configuration: {:?}", config);

    let container = DefaultAppContainer::new(&config);
    cli::run(cli, &container, &config)
}
