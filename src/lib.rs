//! storyreel library
//!
//! Composes a narrated video from a set of clips: the narration is probed for
//! its duration, clips are trimmed to equal slices and normalized to a common
//! frame, subtitle cues are spread evenly across the narration, and the whole
//! thing is expressed as one ffmpeg filter graph and encoded.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod config_initialization;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use config::AppConfig;
pub use domain::errors::DomainError;
pub use domain::model::{AspectRatio, ComposeReport, ComposeRequest, MediaClip};
pub use error::{StoryReelError, StoryReelResult};
