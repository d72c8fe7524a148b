//! Command-line argument definitions

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::domain::errors::DomainError;
use crate::domain::model::{AspectRatio, ComposeRequest, MediaClip, SegmentMode};

/// Inputs describing one composition
#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Source video clip, in playback order (repeatable)
    #[arg(short, long = "clip", value_name = "FILE")]
    pub clips: Vec<PathBuf>,

    /// Narration audio file
    #[arg(short, long, value_name = "FILE")]
    pub narration: PathBuf,

    /// Narration transcript text
    #[arg(short, long, conflicts_with = "transcript_file")]
    pub transcript: Option<String>,

    /// Read the transcript from a UTF-8 text file
    #[arg(long, value_name = "FILE")]
    pub transcript_file: Option<PathBuf>,

    /// Text to draw instead of the transcript
    #[arg(long)]
    pub subtitle_text: Option<String>,

    /// Do not draw subtitles
    #[arg(long)]
    pub no_subtitles: bool,

    /// Output aspect ratio: "16:9" for landscape, anything else for portrait
    #[arg(short, long, default_value = "9:16")]
    pub aspect: String,

    /// Subtitle segmentation: sentences or phrases (default from config)
    #[arg(long)]
    pub segment_mode: Option<String>,

    /// Output video file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,
}

impl RequestArgs {
    /// Build the request; `default_mode` applies when no mode flag is given
    pub fn to_request(&self, default_mode: SegmentMode) -> Result<ComposeRequest, DomainError> {
        let transcript = match (&self.transcript, &self.transcript_file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path).map_err(|e| {
                DomainError::BadArgs(format!(
                    "Failed to read transcript {}: {}",
                    path.display(),
                    e
                ))
            })?,
            (None, None) => String::new(),
        };

        let segment_mode = match &self.segment_mode {
            Some(mode) => SegmentMode::parse(mode)?,
            None => default_mode,
        };

        let mut request = ComposeRequest::new(
            self.clips.iter().map(MediaClip::new).collect(),
            &self.narration,
            transcript,
            AspectRatio::from_label(&self.aspect),
            &self.output,
        );
        request.subtitles_enabled = !self.no_subtitles;
        request.subtitle_text = self.subtitle_text.clone();
        request.segment_mode = segment_mode;
        Ok(request)
    }
}

/// Arguments for the compose command
#[derive(Args, Debug)]
pub struct ComposeArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Skip the hardware encoder and use the software profile only
    #[arg(long)]
    pub no_hardware: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Narration duration in seconds; skips probing
    #[arg(long)]
    pub duration: Option<f64>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media file path
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
