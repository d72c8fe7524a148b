// TOML config adapter - Configuration loading from TOML files

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::error::{StoryReelError, StoryReelResult};

/// Loads [`AppConfig`] from TOML
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse a TOML document; missing sections and keys keep their defaults
    pub fn parse(toml_content: &str, origin: &Path) -> StoryReelResult<AppConfig> {
        let config: AppConfig = toml::from_str(toml_content).map_err(|source| StoryReelError::ConfigParse {
            path: origin.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit config file. The file must exist.
    pub fn load_file(path: &Path) -> StoryReelResult<AppConfig> {
        info!("Loading configuration from: {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Load the explicit file when given, else `storyreel.toml` in `dir` when
    /// present, else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> StoryReelResult<AppConfig> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let candidate: PathBuf = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            return Self::load_file(&candidate);
        }

        debug!("No config file found, using defaults");
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use crate::domain::model::SegmentMode;
    use tempfile::TempDir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml_content = r#"
[tools]
ffmpeg = "/opt/ffmpeg/bin/ffmpeg"

[encode]
hardware_enabled = false

[subtitles]
font_color = "yellow"
segment_mode = "phrases"

[logging]
format = "json"
"#;
        let config = TomlConfigAdapter::parse(toml_content, Path::new("test.toml")).unwrap();
        assert_eq!(config.tools.ffmpeg, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.tools.ffprobe, PathBuf::from("ffprobe"));
        assert!(!config.encode.hardware_enabled);
        assert_eq!(config.encode.software.codec, "libx264");
        assert_eq!(config.subtitles.style.font_color, "yellow");
        assert_eq!(config.subtitles.style.box_color, "black@0.7");
        assert_eq!(config.subtitles.segment_mode, SegmentMode::Phrases);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_custom_profile() {
        let toml_content = r#"
[encode.software]
codec = "libx265"
preset = "slow"
crf = 28
"#;
        let config = TomlConfigAdapter::parse(toml_content, Path::new("test.toml")).unwrap();
        assert_eq!(config.encode.software.codec, "libx265");
        assert_eq!(config.encode.software.crf, Some(28));
        assert_eq!(config.encode.software.bitrate, None);
        assert_eq!(config.encode.hardware.codec, "h264_nvenc");
    }

    #[test]
    fn test_invalid_toml_is_config_parse_error() {
        let err = TomlConfigAdapter::parse("[encode\nhardware_enabled = 1", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, StoryReelError::ConfigParse { .. }));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        let config = TomlConfigAdapter::discover(None, dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());

        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "[composition]\nmin_clips = 2\n").unwrap();
        let config = TomlConfigAdapter::discover(None, dir.path()).unwrap();
        assert_eq!(config.composition.min_clips, 2);

        let missing = dir.path().join("missing.toml");
        assert!(TomlConfigAdapter::discover(Some(&missing), dir.path()).is_err());
    }
}
