//! FFmpeg execution adapter
//!
//! Runs the final encode, trying the hardware profile first when enabled and
//! falling back to the software profile exactly once.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::engine::EncodeSettings;
use crate::ports::*;

/// Encode executor driving the ffmpeg binary
pub struct FFmpegAdapter {
    ffmpeg: PathBuf,
    settings: EncodeSettings,
    process: Arc<dyn ProcessPort>,
}

impl FFmpegAdapter {
    pub fn new(ffmpeg: impl Into<PathBuf>, settings: EncodeSettings, process: Arc<dyn ProcessPort>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            settings,
            process,
        }
    }

    pub fn settings(&self) -> &EncodeSettings {
        &self.settings
    }
}

impl EncodePort for FFmpegAdapter {
    fn encode(&self, job: &EncodeJob) -> Result<EncodeResult, DomainError> {
        let order = self.settings.attempt_order();
        let mut attempts = 0;
        let mut last: Option<(ProfileKind, ProcessOutput)> = None;

        for (kind, profile) in order {
            if let Some((previous, output)) = &last {
                warn!(
                    "{} encode failed with exit code {:?}, retrying with {} profile",
                    previous, output.exit_code, kind
                );
            }

            attempts += 1;
            info!("Encoding {} with {} profile ({})", job.output.display(), kind, profile.codec);
            let args = self.settings.build_args(job, profile);
            let output = self.process.run(&self.ffmpeg, &args)?;

            if output.success() {
                info!("Encode finished with {} profile after {} attempt(s)", kind, attempts);
                return Ok(EncodeResult {
                    success: true,
                    profile: kind,
                    attempts,
                    diagnostics: output.stderr,
                });
            }
            debug!("{} encode stderr:\n{}", kind, output.stderr);
            last = Some((kind, output));
        }

        let (profile, output) = last.ok_or_else(|| {
            DomainError::BadArgs("no encoder profile to attempt".to_string())
        })?;
        error!("Encode failed after {} attempt(s)", attempts);
        Ok(EncodeResult {
            success: false,
            profile,
            attempts,
            diagnostics: output.stderr,
        })
    }
}
