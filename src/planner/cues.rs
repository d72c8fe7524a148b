//! Subtitle cue planning and overlay rendering

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::model::{SubtitleCue, SubtitleUnit, TargetFrame};
use crate::domain::rules::UniformDivision;
use crate::graph::{DrawText, Filter};
use crate::planner::segmenter::TextSegmenter;

/// Visual style shared by every cue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleStyle {
    pub font_color: String,
    /// Background box colour, with alpha
    pub box_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_file: Option<String>,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_color: "white".to_string(),
            box_color: "black@0.7".to_string(),
            font_file: None,
        }
    }
}

/// Turns subtitle units into time windows and windows into overlays
#[derive(Debug, Clone, Default)]
pub struct SubtitleCuePlanner {
    segmenter: TextSegmenter,
    style: SubtitleStyle,
}

impl SubtitleCuePlanner {
    pub fn new(segmenter: TextSegmenter, style: SubtitleStyle) -> Self {
        Self { segmenter, style }
    }

    /// Segment `text` and plan its cues over `total` seconds.
    ///
    /// When segmentation yields nothing, the raw text is used as the single
    /// unit instead of dividing by zero.
    pub fn plan_text(&self, text: &str, total: f64) -> Vec<SubtitleCue> {
        let mut units = SubtitleUnit::from_segments(self.segmenter.segment(text));
        if units.is_empty() {
            units = SubtitleUnit::from_segments(vec![text.to_string()]);
        }
        self.plan(&units, total)
    }

    /// One cue per unit, each `total / units.len()` long, back to back
    pub fn plan(&self, units: &[SubtitleUnit], total: f64) -> Vec<SubtitleCue> {
        let windows = UniformDivision::windows(total, units.len());
        debug!(
            "Planning {} cues of {:.3}s over {:.3}s",
            units.len(),
            UniformDivision::window(total, units.len()),
            total
        );
        units
            .iter()
            .zip(windows)
            .map(|(unit, (start, end))| SubtitleCue {
                text: unit.text.clone(),
                start,
                end,
            })
            .collect()
    }

    /// Overlay chain drawing each cue during its window.
    ///
    /// Cues whose text is blank are skipped; their window simply shows no text.
    /// Windows are half-open except the last, which runs through the end.
    pub fn overlays(&self, cues: &[SubtitleCue], frame: TargetFrame) -> Vec<Filter> {
        let font_size = if frame.is_portrait() { "h/18" } else { "h/16" };
        let last = cues.len().saturating_sub(1);
        cues.iter()
            .enumerate()
            .filter(|(_, cue)| !cue.text.trim().is_empty())
            .map(|(index, cue)| {
                Filter::DrawText(DrawText {
                    text: cue.text.trim().to_string(),
                    font_size: font_size.to_string(),
                    font_color: self.style.font_color.clone(),
                    font_file: self.style.font_file.clone(),
                    box_color: self.style.box_color.clone(),
                    x: "(w-text_w)/2".to_string(),
                    // three quarters of the way down the frame
                    y: "h-h/4".to_string(),
                    start: cue.start,
                    end: cue.end,
                    closed_end: index == last,
                })
            })
            .collect()
    }
}
