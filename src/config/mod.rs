//! Application configuration model

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;
use crate::domain::model::SegmentMode;
use crate::engine::EncodeSettings;
use crate::planner::SubtitleStyle;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "storyreel.toml";

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolPaths,
    pub encode: EncodeSettings,
    pub subtitles: SubtitleSettings,
    pub composition: CompositionSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Reject values that would only fail later, mid-run
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.tools.ffmpeg.as_os_str().is_empty() {
            return Err(DomainError::ConfigError("tools.ffmpeg must not be empty".to_string()));
        }
        if self.tools.ffprobe.as_os_str().is_empty() {
            return Err(DomainError::ConfigError("tools.ffprobe must not be empty".to_string()));
        }
        for (name, profile) in [("hardware", &self.encode.hardware), ("software", &self.encode.software)] {
            if profile.codec.trim().is_empty() {
                return Err(DomainError::ConfigError(format!(
                    "encode.{}.codec must not be empty",
                    name
                )));
            }
            if let Some(crf) = profile.crf {
                if crf > 51 {
                    return Err(DomainError::ConfigError(format!(
                        "encode.{}.crf must be between 0 and 51, got {}",
                        name, crf
                    )));
                }
            }
        }
        if self.encode.output.frame_rate == 0 {
            return Err(DomainError::ConfigError("encode.output.frame_rate must be positive".to_string()));
        }
        let style = &self.subtitles.style;
        for (name, color) in [("font_color", &style.font_color), ("box_color", &style.box_color)] {
            if !is_color_token(color) {
                return Err(DomainError::ConfigError(format!(
                    "subtitles.{} must be a colour name, #RRGGBB or 0xRRGGBB with optional @alpha, got {:?}",
                    name, color
                )));
            }
        }
        Ok(())
    }
}

/// Colours are written into the filter graph as-is, so only characters that
/// neither the option nor the graph parser treats specially are allowed.
fn is_color_token(color: &str) -> bool {
    !color.is_empty()
        && color
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '#' | '_'))
}

/// External tool locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Subtitle appearance and segmentation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubtitleSettings {
    #[serde(flatten)]
    pub style: SubtitleStyle,
    pub segment_mode: SegmentMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositionSettings {
    /// Fewest clips a composition accepts
    pub min_clips: usize,
}

impl Default for CompositionSettings {
    fn default() -> Self {
        Self { min_clips: 1 }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// Single-line text output
    Compact,
    /// JSON lines for structured logging
    Json,
}

impl LogFormat {
    pub fn parse(format_str: &str) -> Result<Self, DomainError> {
        match format_str.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(DomainError::BadArgs(format!(
                "Invalid log format: {}. Valid formats: pretty, compact, json",
                format_str
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `info` or `storyreel=debug`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.encode.hardware_enabled);
        assert_eq!(config.composition.min_clips, 1);
        assert_eq!(config.tools.ffmpeg, PathBuf::from("ffmpeg"));
    }

    #[test]
    fn test_validate_rejects_bad_crf() {
        let mut config = AppConfig::default();
        config.encode.software.crf = Some(60);
        assert!(matches!(config.validate(), Err(DomainError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_empty_tool() {
        let mut config = AppConfig::default();
        config.tools.ffprobe = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_colour_forms() {
        let mut config = AppConfig::default();
        for color in ["yellow", "black@0.7", "#FFCC00", "0xffcc00@0.5", "dark_green"] {
            config.subtitles.style.font_color = color.to_string();
            assert!(config.validate().is_ok(), "{} should be accepted", color);
        }
    }

    #[test]
    fn test_validate_rejects_colours_that_break_the_graph() {
        for color in ["", "white:x=0", "red,split", "blue;", "[v0]", "it's", "white\\", "light gray"] {
            let mut config = AppConfig::default();
            config.subtitles.style.box_color = color.to_string();
            assert!(
                matches!(config.validate(), Err(DomainError::ConfigError(_))),
                "{:?} should be rejected",
                color
            );
        }

        let mut config = AppConfig::default();
        config.subtitles.style.font_color = "white:fontsize=99".to_string();
        match config.validate() {
            Err(DomainError::ConfigError(message)) => assert!(message.contains("subtitles.font_color")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("JSON").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::parse("compact").unwrap(), LogFormat::Compact);
        assert!(LogFormat::parse("xml").is_err());
    }
}
