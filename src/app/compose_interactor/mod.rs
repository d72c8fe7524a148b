// Compose interactor - Orchestrates the narrated composition use case

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::graph::GraphAssembler;
use crate::planner::{
    ClipNormalizationPlanner, CompositionPlan, SubtitleCuePlanner, SubtitleStyle, TextSegmenter,
};
use crate::ports::*;

/// Interactor for the compose use case
pub struct ComposeInteractor {
    probe_port: Arc<dyn ProbePort>,
    encode_port: Arc<dyn EncodePort>,
    fs_port: Arc<dyn FsPort>,
    style: SubtitleStyle,
    clip_rule: ClipCountRule,
}

impl ComposeInteractor {
    /// Create new compose interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        encode_port: Arc<dyn EncodePort>,
        fs_port: Arc<dyn FsPort>,
        style: SubtitleStyle,
        clip_rule: ClipCountRule,
    ) -> Self {
        Self {
            probe_port,
            encode_port,
            fs_port,
            style,
            clip_rule,
        }
    }

    /// Run every stage up to, but not including, the encode.
    ///
    /// `duration_override` replaces probing the narration.
    pub fn plan(
        &self,
        request: &ComposeRequest,
        duration_override: Option<f64>,
    ) -> Result<CompositionPlan, DomainError> {
        for path in request.input_paths() {
            if !self.fs_port.file_exists(path) {
                return Err(DomainError::InputMissing {
                    path: path.display().to_string(),
                });
            }
        }
        self.clip_rule.check(request.clips.len())?;

        let duration = match duration_override {
            Some(duration) => duration,
            None => self.probe_port.probe_duration(&request.narration)?,
        };
        let narration = NarrationTrack::new(&request.narration, duration)?;
        info!(
            "Narration {} lasts {:.3}s",
            narration.path.display(),
            narration.duration
        );

        let frame = TargetFrame::from_aspect(request.aspect);
        let total = narration.duration;

        let (cues, overlays) = if request.wants_subtitles() {
            let planner = SubtitleCuePlanner::new(
                TextSegmenter::new(request.segment_mode),
                self.style.clone(),
            );
            let cues = planner.plan_text(request.overlay_text(), total);
            let overlays = planner.overlays(&cues, frame);
            info!("Planned {} subtitle cues", cues.len());
            (cues, Some(overlays))
        } else {
            info!("Subtitles disabled");
            (Vec::new(), None)
        };

        let slices = ClipNormalizationPlanner::slices(&request.clips, total);
        let chains = slices
            .iter()
            .map(|slice| ClipNormalizationPlanner::chain(slice, frame))
            .collect();
        info!(
            "Normalizing {} clips to {} at {:.3}s each",
            slices.len(),
            frame,
            UniformDivision::window(total, slices.len())
        );

        let graph = GraphAssembler::build(chains, overlays, request.clips.len());

        Ok(CompositionPlan {
            narration,
            frame,
            slices,
            cues,
            graph,
        })
    }

    /// Encoder job for a finished plan
    pub fn encode_job(request: &ComposeRequest, plan: &CompositionPlan) -> EncodeJob {
        EncodeJob {
            inputs: request
                .input_paths()
                .into_iter()
                .map(|p| p.to_path_buf())
                .collect(),
            graph: plan.graph.clone(),
            output: request.output.clone(),
        }
    }

    /// Plan and encode the composition
    pub fn compose(&self, request: &ComposeRequest) -> Result<ComposeReport, DomainError> {
        self.run_composition(request).map_err(|err| {
            error!(kind = err.kind(), "Composition of {} failed: {}", request.output.display(), err);
            err
        })
    }

    fn run_composition(&self, request: &ComposeRequest) -> Result<ComposeReport, DomainError> {
        info!("Starting composition of {}", request.output.display());

        let plan = self.plan(request, None)?;
        self.fs_port.prepare_output(&request.output)?;

        let job = Self::encode_job(request, &plan);
        let result = self.encode_port.encode(&job)?;
        if !result.success {
            return Err(DomainError::EncodeFailed {
                attempts: result.attempts,
                diagnostics: result.diagnostics,
            });
        }

        info!("Composition written to {}", request.output.display());
        Ok(ComposeReport {
            output: request.output.clone(),
            narration_duration: plan.narration.duration,
            clip_count: plan.slices.len(),
            slice_length: plan.slice_length(),
            cue_count: plan.cues.len(),
            frame: plan.frame,
            profile: result.profile,
            attempts: result.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    struct FakeFs {
        existing: HashSet<PathBuf>,
    }

    impl FsPort for FakeFs {
        fn file_exists(&self, file_path: &Path) -> bool {
            self.existing.contains(file_path)
        }

        fn prepare_output(&self, _file_path: &Path) -> Result<(), DomainError> {
            Ok(())
        }
    }

    struct FixedProbe(Result<f64, DomainError>);

    impl ProbePort for FixedProbe {
        fn probe_duration(&self, _file_path: &Path) -> Result<f64, DomainError> {
            self.0.clone()
        }
    }

    struct RecordingEncoder {
        success: bool,
        jobs: Mutex<Vec<EncodeJob>>,
    }

    impl EncodePort for RecordingEncoder {
        fn encode(&self, job: &EncodeJob) -> Result<EncodeResult, DomainError> {
            self.jobs.lock().unwrap().push(job.clone());
            Ok(EncodeResult {
                success: self.success,
                profile: ProfileKind::Software,
                attempts: 2,
                diagnostics: "Conversion failed!".to_string(),
            })
        }
    }

    fn request() -> ComposeRequest {
        ComposeRequest::new(
            vec![MediaClip::new("a.mp4"), MediaClip::new("b.mp4")],
            "voice.mp3",
            "Hello world. How are you?",
            AspectRatio::Portrait,
            "out/final.mp4",
        )
    }

    fn interactor(
        probe: Result<f64, DomainError>,
        encode_ok: bool,
    ) -> (ComposeInteractor, Arc<RecordingEncoder>) {
        let fs = FakeFs {
            existing: ["a.mp4", "b.mp4", "voice.mp3"].iter().map(PathBuf::from).collect(),
        };
        let encoder = Arc::new(RecordingEncoder {
            success: encode_ok,
            jobs: Mutex::new(Vec::new()),
        });
        let interactor = ComposeInteractor::new(
            Arc::new(FixedProbe(probe)),
            encoder.clone(),
            Arc::new(fs),
            SubtitleStyle::default(),
            ClipCountRule::default(),
        );
        (interactor, encoder)
    }

    #[test]
    fn test_plan_with_subtitles() {
        let (interactor, _) = interactor(Ok(20.0), true);
        let plan = interactor.plan(&request(), None).unwrap();

        assert_eq!(plan.slice_length(), 10.0);
        assert_eq!(plan.cues.len(), 2);
        assert_eq!((plan.cues[1].start, plan.cues[1].end), (10.0, 20.0));
        assert_eq!(plan.frame, TargetFrame::from_aspect(AspectRatio::Portrait));
        assert_eq!(plan.graph.video_label(), "vfinal");
        assert!(plan.graph.render().contains("[2:a]asetpts=PTS-STARTPTS[afinal]"));
    }

    #[test]
    fn test_plan_without_subtitles() {
        let (interactor, _) = interactor(Ok(20.0), true);
        let mut request = request();
        request.subtitles_enabled = false;

        let plan = interactor.plan(&request, None).unwrap();
        assert!(plan.cues.is_empty());
        assert_eq!(plan.graph.video_label(), "base");
        assert!(!plan.graph.render().contains("drawtext"));
    }

    #[test]
    fn test_duration_override_skips_probe() {
        let failing = Err(DomainError::DurationUnavailable {
            path: "voice.mp3".to_string(),
            reason: "unused".to_string(),
        });
        let (interactor, _) = interactor(failing, true);
        let plan = interactor.plan(&request(), Some(30.0)).unwrap();
        assert_eq!(plan.narration.duration, 30.0);
    }

    #[test]
    fn test_missing_input() {
        let (interactor, encoder) = interactor(Ok(20.0), true);
        let mut request = request();
        request.clips.push(MediaClip::new("c.mp4"));

        let err = interactor.compose(&request).unwrap_err();
        assert_eq!(err, DomainError::InputMissing { path: "c.mp4".to_string() });
        assert!(encoder.jobs.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_clips() {
        let (interactor, _) = interactor(Ok(20.0), true);
        let mut request = request();
        request.clips.clear();

        let err = interactor.compose(&request).unwrap_err();
        assert!(matches!(err, DomainError::InsufficientClips { found: 0, .. }));
    }

    #[test]
    fn test_compose_report() {
        let (interactor, encoder) = interactor(Ok(20.0), true);
        let report = interactor.compose(&request()).unwrap();

        assert_eq!(report.clip_count, 2);
        assert_eq!(report.slice_length, 10.0);
        assert_eq!(report.cue_count, 2);
        assert_eq!(report.attempts, 2);

        let jobs = encoder.jobs.lock().unwrap();
        assert_eq!(
            jobs[0].inputs,
            vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4"), PathBuf::from("voice.mp3")]
        );
    }

    #[test]
    fn test_encode_failure_maps_to_error() {
        let (interactor, _) = interactor(Ok(20.0), false);
        let err = interactor.compose(&request()).unwrap_err();
        assert_eq!(
            err,
            DomainError::EncodeFailed {
                attempts: 2,
                diagnostics: "Conversion failed!".to_string()
            }
        );
    }
}
