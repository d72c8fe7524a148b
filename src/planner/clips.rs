//! Clip normalization planning

use tracing::debug;

use crate::domain::model::{ClipSlice, MediaClip, TargetFrame};
use crate::domain::rules::UniformDivision;
use crate::graph::assembler::clip_label;
use crate::graph::{AspectMode, Directive, Filter, StreamRef};

/// Plans how every source clip is cut and reshaped to the target frame
pub struct ClipNormalizationPlanner;

impl ClipNormalizationPlanner {
    /// Equal slices of `total` seconds, one per clip, in input order
    pub fn slices(clips: &[MediaClip], total: f64) -> Vec<ClipSlice> {
        let trim_length = UniformDivision::window(total, clips.len());
        clips
            .iter()
            .enumerate()
            .map(|(input_index, clip)| {
                if let Some(source) = clip.duration {
                    if source < trim_length {
                        debug!(
                            "Clip {} is {:.3}s, shorter than its {:.3}s slice",
                            clip.path.display(),
                            source,
                            trim_length
                        );
                    }
                }
                ClipSlice {
                    clip: clip.clone(),
                    input_index,
                    trim_length,
                }
            })
            .collect()
    }

    /// Directive chain for one slice: trim, restart timestamps, scale up to
    /// cover the frame, centre crop, square pixels.
    pub fn chain(slice: &ClipSlice, frame: TargetFrame) -> Directive {
        Directive::new(
            vec![StreamRef::input_video(slice.input_index)],
            vec![
                Filter::Trim {
                    start: 0.0,
                    end: slice.trim_length,
                },
                Filter::ResetVideoPts,
                Filter::Scale {
                    width: frame.width,
                    height: frame.height,
                    aspect: AspectMode::Increase,
                },
                Filter::Crop {
                    width: frame.width,
                    height: frame.height,
                },
                Filter::SquarePixels,
            ],
            vec![StreamRef::label(clip_label(slice.input_index))],
        )
    }

    /// Chains for every clip, in input order
    pub fn plan(clips: &[MediaClip], total: f64, frame: TargetFrame) -> Vec<Directive> {
        Self::slices(clips, total)
            .iter()
            .map(|slice| Self::chain(slice, frame))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::AspectRatio;

    fn clips(n: usize) -> Vec<MediaClip> {
        (0..n).map(|i| MediaClip::new(format!("clip_{}.mp4", i))).collect()
    }

    #[test]
    fn test_two_clips_twenty_seconds() {
        let frame = TargetFrame::from_aspect(AspectRatio::Portrait);
        let chains = ClipNormalizationPlanner::plan(&clips(2), 20.0, frame);

        assert_eq!(chains.len(), 2);
        for chain in &chains {
            assert_eq!(
                chain.chain[0],
                Filter::Trim {
                    start: 0.0,
                    end: 10.0
                }
            );
        }
        assert_eq!(
            chains[1].render(),
            "[1:v]trim=0:10,setpts=PTS-STARTPTS,\
             scale=1080:1920:force_original_aspect_ratio=increase,\
             crop=1080:1920,setsar=1:1[v1]"
        );
    }

    #[test]
    fn test_slices_sum_to_total() {
        for n in 1..=12 {
            let total = 37.9;
            let slices = ClipNormalizationPlanner::slices(&clips(n), total);
            let sum: f64 = slices.iter().map(|s| s.trim_length).sum();
            assert!((sum - total).abs() < 1e-9, "n={} sum={}", n, sum);
        }
    }

    #[test]
    fn test_slice_length_ignores_source_duration() {
        let clips = vec![
            MediaClip::with_duration("long.mp4", 120.0),
            MediaClip::with_duration("short.mp4", 1.0),
        ];
        let slices = ClipNormalizationPlanner::slices(&clips, 9.0);
        assert_eq!(slices[0].trim_length, 4.5);
        assert_eq!(slices[1].trim_length, 4.5);
        assert_eq!(slices[1].input_index, 1);
    }

    #[test]
    fn test_chain_order_and_landscape_frame() {
        let frame = TargetFrame::from_aspect(AspectRatio::Landscape);
        let chains = ClipNormalizationPlanner::plan(&clips(3), 9.0, frame);
        let names: Vec<&str> = chains[2].chain.iter().map(Filter::name).collect();
        assert_eq!(names, vec!["trim", "setpts", "scale", "crop", "setsar"]);
        assert_eq!(chains[2].inputs, vec![StreamRef::input_video(2)]);
        assert_eq!(chains[2].outputs, vec![StreamRef::label("v2")]);
        assert!(chains[0].render().contains("crop=1920:1080"));
    }
}
