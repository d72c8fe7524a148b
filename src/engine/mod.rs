//! Encoder profiles and ffmpeg argument construction

use serde::{Deserialize, Serialize};

use crate::domain::model::ProfileKind;
use crate::ports::EncodeJob;

/// Video encoder parameters for one attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeProfile {
    /// Video codec
    pub codec: String,
    /// Encoding preset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    /// Rate-control mode (`-rc:v`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_control: Option<String>,
    /// Target bitrate, e.g. `5M`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
    /// Peak bitrate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<String>,
    /// Rate-control buffer size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<String>,
    /// Constant Rate Factor (0-51)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crf: Option<u8>,
}

impl EncodeProfile {
    /// NVIDIA NVENC, variable bitrate with a bounded buffer
    pub fn nvenc() -> Self {
        Self {
            codec: "h264_nvenc".to_string(),
            preset: Some("p4".to_string()),
            rate_control: Some("vbr".to_string()),
            bitrate: Some("5M".to_string()),
            max_rate: Some("10M".to_string()),
            buffer_size: Some("10M".to_string()),
            crf: None,
        }
    }

    /// libx264, quality-controlled
    pub fn x264() -> Self {
        Self {
            codec: "libx264".to_string(),
            preset: Some("medium".to_string()),
            rate_control: None,
            bitrate: None,
            max_rate: None,
            buffer_size: None,
            crf: Some(23),
        }
    }

    /// Video codec arguments in the order ffmpeg documents them
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["-c:v".to_string(), self.codec.clone()];
        let optional = [
            ("-preset", self.preset.clone()),
            ("-rc:v", self.rate_control.clone()),
            ("-b:v", self.bitrate.clone()),
            ("-maxrate:v", self.max_rate.clone()),
            ("-bufsize:v", self.buffer_size.clone()),
            ("-crf", self.crf.map(|crf| crf.to_string())),
        ];
        for (flag, value) in optional {
            if let Some(value) = value {
                args.push(flag.to_string());
                args.push(value);
            }
        }
        args
    }
}

/// Settings shared by both encoder profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub frame_rate: u32,
    pub pixel_format: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            frame_rate: 30,
            pixel_format: "yuv420p".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl OutputSettings {
    pub fn args(&self) -> Vec<String> {
        vec![
            "-r".to_string(),
            self.frame_rate.to_string(),
            "-pix_fmt".to_string(),
            self.pixel_format.clone(),
            "-c:a".to_string(),
            self.audio_codec.clone(),
            "-b:a".to_string(),
            self.audio_bitrate.clone(),
        ]
    }
}

/// Encode stage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    /// Try the hardware profile before the software one
    pub hardware_enabled: bool,
    pub hardware: EncodeProfile,
    pub software: EncodeProfile,
    pub output: OutputSettings,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            hardware_enabled: true,
            hardware: EncodeProfile::nvenc(),
            software: EncodeProfile::x264(),
            output: OutputSettings::default(),
        }
    }
}

impl EncodeSettings {
    /// Profiles in the order they are attempted
    pub fn attempt_order(&self) -> Vec<(ProfileKind, &EncodeProfile)> {
        let mut order = Vec::with_capacity(2);
        if self.hardware_enabled {
            order.push((ProfileKind::Hardware, &self.hardware));
        }
        order.push((ProfileKind::Software, &self.software));
        order
    }

    /// Full ffmpeg argument vector for one attempt
    pub fn build_args(&self, job: &EncodeJob, profile: &EncodeProfile) -> Vec<String> {
        let mut args = vec!["-y".to_string()];
        for input in &job.inputs {
            args.push("-i".to_string());
            args.push(input.to_string_lossy().to_string());
        }
        args.push("-filter_complex".to_string());
        args.push(job.graph.render());
        args.extend(job.graph.map_args());
        args.extend(profile.args());
        args.extend(self.output.args());
        args.push(job.output.to_string_lossy().to_string());
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nvenc_profile_args() {
        assert_eq!(
            EncodeProfile::nvenc().args(),
            vec![
                "-c:v", "h264_nvenc", "-preset", "p4", "-rc:v", "vbr", "-b:v", "5M",
                "-maxrate:v", "10M", "-bufsize:v", "10M"
            ]
        );
    }

    #[test]
    fn test_x264_profile_args() {
        assert_eq!(
            EncodeProfile::x264().args(),
            vec!["-c:v", "libx264", "-preset", "medium", "-crf", "23"]
        );
    }

    #[test]
    fn test_output_settings_args() {
        assert_eq!(
            OutputSettings::default().args(),
            vec!["-r", "30", "-pix_fmt", "yuv420p", "-c:a", "aac", "-b:a", "192k"]
        );
    }

    #[test]
    fn test_attempt_order() {
        let mut settings = EncodeSettings::default();
        let kinds: Vec<ProfileKind> = settings.attempt_order().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![ProfileKind::Hardware, ProfileKind::Software]);

        settings.hardware_enabled = false;
        let kinds: Vec<ProfileKind> = settings.attempt_order().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, vec![ProfileKind::Software]);
    }
}
