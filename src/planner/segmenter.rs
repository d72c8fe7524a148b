//! Transcript segmentation into subtitle units

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::model::SegmentMode;

fn terminators() -> &'static Regex {
    static TERMINATORS: OnceLock<Regex> = OnceLock::new();
    TERMINATORS.get_or_init(|| Regex::new(r"[.!?]+").expect("static pattern"))
}

/// Splits narration text into the units that become subtitle cues
#[derive(Debug, Clone, Copy, Default)]
pub struct TextSegmenter {
    mode: SegmentMode,
}

impl TextSegmenter {
    pub fn new(mode: SegmentMode) -> Self {
        Self { mode }
    }

    /// Segment according to the configured mode.
    ///
    /// Non-blank input never yields an empty list: if nothing survives the
    /// split (e.g. `"..."`), the trimmed text becomes the only unit.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }

        let units = match self.mode {
            SegmentMode::Sentences => split_sentences(trimmed),
            SegmentMode::Phrases => split_phrases(trimmed),
        };

        if units.is_empty() {
            vec![trimmed.to_string()]
        } else {
            units
        }
    }
}

/// Split on runs of `.`, `!` and `?`, dropping empty pieces
pub fn split_sentences(text: &str) -> Vec<String> {
    terminators()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Two-word groups per sentence. A leftover single word joins the previous
/// group, even across a sentence boundary, and only stands alone when it is
/// the very first word.
pub fn split_phrases(text: &str) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();

    for sentence in split_sentences(text) {
        let words: Vec<&str> = sentence.split_whitespace().collect();
        for pair in words.chunks(2) {
            if pair.len() == 2 {
                phrases.push(pair.join(" "));
            } else if let Some(last) = phrases.last_mut() {
                last.push(' ');
                last.push_str(pair[0]);
            } else {
                phrases.push(pair[0].to_string());
            }
        }
    }

    phrases
}
