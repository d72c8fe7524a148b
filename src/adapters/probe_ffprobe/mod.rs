//! FFprobe adapter for media duration probing
//!
//! The container duration reported by ffprobe is tried first. When that
//! yields nothing usable the file is decoded with ffmpeg and the duration
//! is read from the `Duration:` line of its banner.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::ports::*;
use crate::utils::time::TimeParser;

fn duration_banner() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Duration:\s*(\d{2,}:\d{2}:\d{2}(?:\.\d+)?)").expect("valid duration pattern")
    })
}

/// Read the duration from ffmpeg's diagnostic banner
pub fn parse_duration_banner(stderr: &str) -> Option<f64> {
    let caps = duration_banner().captures(stderr)?;
    TimeParser::new().parse_clock(&caps[1]).ok()
}

/// Parse ffprobe's `csv=p=0` duration output
pub fn parse_container_duration(stdout: &str) -> Option<f64> {
    let value: f64 = stdout.lines().next()?.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Duration prober driving the ffprobe and ffmpeg binaries
pub struct FFprobeAdapter {
    ffprobe: PathBuf,
    ffmpeg: PathBuf,
    process: Arc<dyn ProcessPort>,
}

impl FFprobeAdapter {
    pub fn new(
        ffprobe: impl Into<PathBuf>,
        ffmpeg: impl Into<PathBuf>,
        process: Arc<dyn ProcessPort>,
    ) -> Self {
        Self {
            ffprobe: ffprobe.into(),
            ffmpeg: ffmpeg.into(),
            process,
        }
    }

    fn container_args(file_path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "quiet".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "csv=p=0".to_string(),
            file_path.to_string_lossy().to_string(),
        ]
    }

    fn decode_args(file_path: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            file_path.to_string_lossy().to_string(),
            "-f".to_string(),
            "null".to_string(),
            "-".to_string(),
        ]
    }

    /// Primary method. Any failure, including a missing ffprobe, yields `Err`
    /// with the reason so the caller can fall back.
    fn probe_container(&self, file_path: &Path) -> Result<f64, String> {
        let output = self
            .process
            .run(&self.ffprobe, &Self::container_args(file_path))
            .map_err(|e| e.to_string())?;
        if !output.success() {
            return Err(format!("ffprobe exited with {:?}", output.exit_code));
        }
        parse_container_duration(&output.stdout)
            .ok_or_else(|| format!("unusable ffprobe output {:?}", output.stdout.trim()))
    }

    /// Fallback method. The banner is read regardless of exit status, and a
    /// missing ffmpeg is reported as an unavailable duration.
    fn probe_by_decoding(&self, file_path: &Path) -> Result<f64, DomainError> {
        let unavailable = |reason: String| DomainError::DurationUnavailable {
            path: file_path.display().to_string(),
            reason,
        };
        let output = self
            .process
            .run(&self.ffmpeg, &Self::decode_args(file_path))
            .map_err(|e| unavailable(e.to_string()))?;
        parse_duration_banner(&output.stderr)
            .ok_or_else(|| unavailable("no Duration line in ffmpeg output".to_string()))
    }
}

impl ProbePort for FFprobeAdapter {
    fn probe_duration(&self, file_path: &Path) -> Result<f64, DomainError> {
        info!("Probing duration of {}", file_path.display());

        match self.probe_container(file_path) {
            Ok(duration) => {
                debug!("ffprobe reported {:.3}s", duration);
                return Ok(duration);
            }
            Err(reason) => warn!(
                "ffprobe could not read duration of {} ({}), decoding with ffmpeg",
                file_path.display(),
                reason
            ),
        }

        let duration = self.probe_by_decoding(file_path)?;
        debug!("ffmpeg banner reported {:.3}s", duration);
        Ok(duration)
    }
}
