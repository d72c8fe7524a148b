//! Graph assembly: normalized clips, concatenation, subtitles and audio

use tracing::debug;

use super::{Directive, Filter, GraphPlan, StreamRef};

/// Label of the concatenated, un-subtitled video
pub const BASE_LABEL: &str = "base";
/// Label of the subtitled video
pub const VIDEO_LABEL: &str = "vfinal";
/// Label of the timestamp-reset narration
pub const AUDIO_LABEL: &str = "afinal";

/// Label of the n-th normalized clip
pub fn clip_label(index: usize) -> String {
    format!("v{}", index)
}

/// Builds the single filter graph a composition run is encoded with
pub struct GraphAssembler;

impl GraphAssembler {
    /// Join the first output of every clip chain, in order, into [`BASE_LABEL`]
    pub fn concat_directive(clip_chains: &[Directive]) -> Directive {
        let inputs = clip_chains
            .iter()
            .filter_map(|chain| chain.outputs.first().cloned())
            .collect();
        Directive::new(
            inputs,
            vec![Filter::Concat {
                segments: clip_chains.len(),
                video: 1,
                audio: 0,
            }],
            vec![StreamRef::label(BASE_LABEL)],
        )
    }

    /// Restart narration timestamps; the narration is input `audio_input`
    pub fn audio_directive(audio_input: usize) -> Directive {
        Directive::new(
            vec![StreamRef::input_audio(audio_input)],
            vec![Filter::ResetAudioPts],
            vec![StreamRef::label(AUDIO_LABEL)],
        )
    }

    /// Assemble the graph in playback order.
    ///
    /// The subtitle chain is applied to the concat output only when it is
    /// present and non-empty; otherwise the concat output itself is mapped.
    pub fn assemble(
        clip_chains: Vec<Directive>,
        concat: Directive,
        subtitles: Option<Vec<Filter>>,
        audio: Directive,
    ) -> GraphPlan {
        let base = first_label(&concat);
        let audio_label = first_label(&audio);

        let mut directives = clip_chains;
        directives.push(concat);

        let video_label = match subtitles {
            Some(overlays) if !overlays.is_empty() => {
                debug!("Applying {} subtitle overlays", overlays.len());
                directives.push(Directive::new(
                    vec![StreamRef::label(base)],
                    overlays,
                    vec![StreamRef::label(VIDEO_LABEL)],
                ));
                VIDEO_LABEL.to_string()
            }
            _ => base,
        };

        directives.push(audio);

        let plan = GraphPlan::new(directives, video_label, audio_label);
        debug_assert_eq!(plan.validate(), Ok(()), "assembled graph has broken labels");
        plan
    }

    /// Convenience wrapper building the concat and audio directives itself
    pub fn build(
        clip_chains: Vec<Directive>,
        subtitles: Option<Vec<Filter>>,
        audio_input: usize,
    ) -> GraphPlan {
        let concat = Self::concat_directive(&clip_chains);
        let audio = Self::audio_directive(audio_input);
        Self::assemble(clip_chains, concat, subtitles, audio)
    }
}

fn first_label(directive: &Directive) -> String {
    directive
        .outputs
        .first()
        .and_then(StreamRef::label_name)
        .unwrap_or_default()
        .to_string()
}
