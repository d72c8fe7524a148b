//! Filter graph model
//!
//! A graph is an ordered list of [`Directive`]s, each reading labelled
//! streams, applying a chain of [`Filter`]s and writing labelled streams.
//! [`GraphPlan`] adds the two labels mapped to the output file and can check
//! its own label wiring before anything is rendered.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub mod assembler;
pub mod filter;

pub use assembler::GraphAssembler;
pub use filter::{AspectMode, DrawText, Filter};

/// Kind of elementary stream taken from an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
}

/// A stream endpoint of a directive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamRef {
    /// Stream of the n-th `-i` input
    Input { index: usize, kind: StreamKind },
    /// Intermediate or final pad label
    Label(String),
}

impl StreamRef {
    pub fn input_video(index: usize) -> Self {
        StreamRef::Input {
            index,
            kind: StreamKind::Video,
        }
    }

    pub fn input_audio(index: usize) -> Self {
        StreamRef::Input {
            index,
            kind: StreamKind::Audio,
        }
    }

    pub fn label(name: impl Into<String>) -> Self {
        StreamRef::Label(name.into())
    }

    /// Label name, if this is not a raw input stream
    pub fn label_name(&self) -> Option<&str> {
        match self {
            StreamRef::Label(name) => Some(name),
            StreamRef::Input { .. } => None,
        }
    }
}

impl fmt::Display for StreamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamRef::Input {
                index,
                kind: StreamKind::Video,
            } => write!(f, "[{}:v]", index),
            StreamRef::Input {
                index,
                kind: StreamKind::Audio,
            } => write!(f, "[{}:a]", index),
            StreamRef::Label(name) => write!(f, "[{}]", name),
        }
    }
}

/// One `[in]filter,filter[out]` statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Directive {
    pub inputs: Vec<StreamRef>,
    pub chain: Vec<Filter>,
    pub outputs: Vec<StreamRef>,
}

impl Directive {
    pub fn new(inputs: Vec<StreamRef>, chain: Vec<Filter>, outputs: Vec<StreamRef>) -> Self {
        Self {
            inputs,
            chain,
            outputs,
        }
    }

    /// True when any filter in the chain has the given name
    pub fn uses(&self, filter_name: &str) -> bool {
        self.chain.iter().any(|f| f.name() == filter_name)
    }

    pub fn render(&self) -> String {
        let inputs: String = self.inputs.iter().map(|s| s.to_string()).collect();
        let chain: Vec<String> = self.chain.iter().map(Filter::render).collect();
        let outputs: String = self.outputs.iter().map(|s| s.to_string()).collect();
        format!("{}{}{}", inputs, chain.join(","), outputs)
    }
}

/// Broken label wiring. Always a bug in whoever built the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("label [{0}] is produced more than once")]
    Duplicate(String),
    #[error("label [{0}] is consumed but never produced")]
    Unproduced(String),
    #[error("label [{0}] is consumed before it is produced")]
    OutOfOrder(String),
    #[error("label [{0}] is consumed more than once")]
    ConsumedTwice(String),
    #[error("label [{0}] is produced but never consumed")]
    Dangling(String),
    #[error("output label [{0}] is also consumed inside the graph")]
    FinalConsumed(String),
    #[error("output label [{0}] is not produced by the graph")]
    MissingFinal(String),
}

/// Fully assembled filter graph plus output stream mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPlan {
    directives: Vec<Directive>,
    video_label: String,
    audio_label: String,
}

impl GraphPlan {
    pub(crate) fn new(
        directives: Vec<Directive>,
        video_label: impl Into<String>,
        audio_label: impl Into<String>,
    ) -> Self {
        Self {
            directives,
            video_label: video_label.into(),
            audio_label: audio_label.into(),
        }
    }

    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Label mapped as the output video stream
    pub fn video_label(&self) -> &str {
        &self.video_label
    }

    /// Label mapped as the output audio stream
    pub fn audio_label(&self) -> &str {
        &self.audio_label
    }

    /// Filter graph text for `-filter_complex`
    pub fn render(&self) -> String {
        self.directives
            .iter()
            .map(Directive::render)
            .collect::<Vec<_>>()
            .join(";")
    }

    /// `-map` arguments selecting the final streams
    pub fn map_args(&self) -> Vec<String> {
        vec![
            "-map".to_string(),
            format!("[{}]", self.video_label),
            "-map".to_string(),
            format!("[{}]", self.audio_label),
        ]
    }

    /// Check that every label is produced once, consumed once after it is
    /// produced, and that the two output labels are produced but left for
    /// the stream mapping.
    pub fn validate(&self) -> Result<(), LabelError> {
        let mut produced_at: HashMap<&str, usize> = HashMap::new();
        for (position, directive) in self.directives.iter().enumerate() {
            for name in directive.outputs.iter().filter_map(StreamRef::label_name) {
                if produced_at.insert(name, position).is_some() {
                    return Err(LabelError::Duplicate(name.to_string()));
                }
            }
        }

        let mut consumed: HashMap<&str, usize> = HashMap::new();
        for (position, directive) in self.directives.iter().enumerate() {
            for name in directive.inputs.iter().filter_map(StreamRef::label_name) {
                match produced_at.get(name) {
                    None => return Err(LabelError::Unproduced(name.to_string())),
                    Some(&at) if at >= position => {
                        return Err(LabelError::OutOfOrder(name.to_string()))
                    }
                    Some(_) => {}
                }
                let count = consumed.entry(name).or_insert(0);
                *count += 1;
                if *count > 1 {
                    return Err(LabelError::ConsumedTwice(name.to_string()));
                }
            }
        }

        for name in [self.video_label.as_str(), self.audio_label.as_str()] {
            if !produced_at.contains_key(name) {
                return Err(LabelError::MissingFinal(name.to_string()));
            }
            if consumed.contains_key(name) {
                return Err(LabelError::FinalConsumed(name.to_string()));
            }
        }

        // Deterministic report: first dangling label in graph order
        for directive in &self.directives {
            for name in directive.outputs.iter().filter_map(StreamRef::label_name) {
                let is_final = name == self.video_label || name == self.audio_label;
                if !is_final && !consumed.contains_key(name) {
                    return Err(LabelError::Dangling(name.to_string()));
                }
            }
        }

        Ok(())
    }
}
