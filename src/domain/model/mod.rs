// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;


/// One source clip handed over by the footage collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaClip {
    pub path: PathBuf,
    /// Source duration, when the caller already knows it
    pub duration: Option<f64>,
}

impl MediaClip {
    /// Create a clip with an unknown duration
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duration: None,
        }
    }

    /// Create a clip whose duration is already known
    pub fn with_duration(path: impl Into<PathBuf>, duration: f64) -> Self {
        Self {
            path: path.into(),
            duration: Some(duration),
        }
    }
}

/// Narration audio with a resolved duration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationTrack {
    pub path: PathBuf,
    pub duration: f64,
}

impl NarrationTrack {
    /// Create a narration track, rejecting durations no timing can be derived from
    pub fn new(path: impl Into<PathBuf>, duration: f64) -> Result<Self, DomainError> {
        let path = path.into();
        if !duration.is_finite() || duration <= 0.0 {
            return Err(DomainError::DurationUnavailable {
                path: path.display().to_string(),
                reason: format!("duration {} is not a positive number of seconds", duration),
            });
        }
        Ok(Self { path, duration })
    }
}

/// One sentence-like piece of the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubtitleUnit {
    pub text: String,
    pub index: usize,
}

impl SubtitleUnit {
    /// Number segments in transcript order
    pub fn from_segments(segments: Vec<String>) -> Vec<Self> {
        segments
            .into_iter()
            .enumerate()
            .map(|(index, text)| Self { text, index })
            .collect()
    }
}

/// Time window during which one subtitle unit is shown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubtitleCue {
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Requested output orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 16:9
    Landscape,
    /// 9:16
    Portrait,
}

impl AspectRatio {
    /// Parse an aspect label. Only "16:9" selects landscape; anything else is portrait.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "16:9" {
            AspectRatio::Landscape
        } else {
            AspectRatio::Portrait
        }
    }

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Output frame size every clip is normalized to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TargetFrame {
    pub width: u32,
    pub height: u32,
}

impl TargetFrame {
    pub fn from_aspect(aspect: AspectRatio) -> Self {
        match aspect {
            AspectRatio::Landscape => Self {
                width: 1920,
                height: 1080,
            },
            AspectRatio::Portrait => Self {
                width: 1080,
                height: 1920,
            },
        }
    }

    /// Taller than wide
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }
}

impl fmt::Display for TargetFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The portion of one source clip that ends up in the composition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipSlice {
    pub clip: MediaClip,
    /// Position of the clip among the encoder inputs
    pub input_index: usize,
    pub trim_length: f64,
}

/// How the transcript is cut into subtitle units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentMode {
    /// One cue per sentence
    #[default]
    Sentences,
    /// One cue per two-word group
    Phrases,
}

impl SegmentMode {
    /// Parse segmentation mode from string
    pub fn parse(mode_str: &str) -> Result<Self, DomainError> {
        match mode_str.trim().to_lowercase().as_str() {
            "sentences" | "sentence" => Ok(SegmentMode::Sentences),
            "phrases" | "phrase" => Ok(SegmentMode::Phrases),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid segment mode: {}. Valid modes: sentences, phrases",
                mode_str
            ))),
        }
    }
}

/// Everything a composition run needs from its caller
#[derive(Debug, Clone)]
pub struct ComposeRequest {
    pub clips: Vec<MediaClip>,
    pub narration: PathBuf,
    pub transcript: String,
    pub aspect: AspectRatio,
    pub subtitles_enabled: bool,
    /// Overrides the transcript as overlay text when set
    pub subtitle_text: Option<String>,
    pub segment_mode: SegmentMode,
    pub output: PathBuf,
}

impl ComposeRequest {
    /// Create a request with subtitles enabled and sentence segmentation
    pub fn new(
        clips: Vec<MediaClip>,
        narration: impl Into<PathBuf>,
        transcript: impl Into<String>,
        aspect: AspectRatio,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            clips,
            narration: narration.into(),
            transcript: transcript.into(),
            aspect,
            subtitles_enabled: true,
            subtitle_text: None,
            segment_mode: SegmentMode::default(),
            output: output.into(),
        }
    }

    /// Text drawn on screen: the explicit subtitle text, else the transcript
    pub fn overlay_text(&self) -> &str {
        self.subtitle_text.as_deref().unwrap_or(&self.transcript)
    }

    /// Subtitles are drawn only when enabled and there is something to draw
    pub fn wants_subtitles(&self) -> bool {
        self.subtitles_enabled && !self.overlay_text().trim().is_empty()
    }

    /// Every path the run will read, in encoder input order
    pub fn input_paths(&self) -> Vec<&Path> {
        self.clips
            .iter()
            .map(|c| c.path.as_path())
            .chain(std::iter::once(self.narration.as_path()))
            .collect()
    }
}

/// Encoder profile that produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    Hardware,
    Software,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Hardware => f.write_str("hardware"),
            ProfileKind::Software => f.write_str("software"),
        }
    }
}

/// Outcome of the encode stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncodeResult {
    pub success: bool,
    /// Profile of the last attempt
    pub profile: ProfileKind,
    pub attempts: usize,
    /// Captured stderr of the last attempt, verbatim
    pub diagnostics: String,
}

/// Summary of a finished composition
#[derive(Debug, Clone, Serialize)]
pub struct ComposeReport {
    pub output: PathBuf,
    pub narration_duration: f64,
    pub clip_count: usize,
    pub slice_length: f64,
    pub cue_count: usize,
    pub frame: TargetFrame,
    pub profile: ProfileKind,
    pub attempts: usize,
}
