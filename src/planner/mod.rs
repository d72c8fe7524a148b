//! Composition planning: segmentation, subtitle cues and clip normalization

use serde::Serialize;

pub mod clips;
pub mod cues;
pub mod segmenter;

pub use clips::ClipNormalizationPlanner;
pub use cues::{SubtitleCuePlanner, SubtitleStyle};
pub use segmenter::TextSegmenter;

use crate::domain::model::{ClipSlice, NarrationTrack, SubtitleCue, TargetFrame};
use crate::graph::GraphPlan;

/// Everything decided before the encoder runs
#[derive(Debug, Clone, Serialize)]
pub struct CompositionPlan {
    pub narration: NarrationTrack,
    pub frame: TargetFrame,
    pub slices: Vec<ClipSlice>,
    /// Empty when subtitles are off
    pub cues: Vec<SubtitleCue>,
    pub graph: GraphPlan,
}

impl CompositionPlan {
    /// Length every clip is trimmed to
    pub fn slice_length(&self) -> f64 {
        self.slices.first().map(|s| s.trim_length).unwrap_or(0.0)
    }
}
