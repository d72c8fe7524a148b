//! Encode executor behaviour against a faked ffmpeg

mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::FakeTools;
use storyreel::adapters::FFmpegAdapter;
use storyreel::domain::model::ProfileKind;
use storyreel::engine::{EncodeProfile, EncodeSettings};
use storyreel::graph::{Directive, Filter, GraphAssembler, StreamRef};
use storyreel::ports::{EncodeJob, EncodePort};

fn job(clip_count: usize) -> EncodeJob {
    let chains = (0..clip_count)
        .map(|i| {
            Directive::new(
                vec![StreamRef::input_video(i)],
                vec![Filter::Trim { start: 0.0, end: 4.0 }, Filter::ResetVideoPts],
                vec![StreamRef::label(format!("v{}", i))],
            )
        })
        .collect();
    let mut inputs: Vec<PathBuf> = (0..clip_count).map(|i| PathBuf::from(format!("clip{}.mp4", i))).collect();
    inputs.push(PathBuf::from("voice.wav"));

    EncodeJob {
        inputs,
        graph: GraphAssembler::build(chains, None, clip_count),
        output: PathBuf::from("out/final.mp4"),
    }
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let at = args.iter().position(|a| a == flag)?;
    args.get(at + 1).map(String::as_str)
}

#[test]
fn test_hardware_first_then_software_once() {
    let tools = Arc::new(FakeTools::new("", vec![1, 0]));
    let adapter = FFmpegAdapter::new("ffmpeg", EncodeSettings::default(), tools.clone());

    let result = adapter.encode(&job(2)).unwrap();
    assert!(result.success);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.profile, ProfileKind::Software);

    let calls = tools.encode_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(value_after(&calls[0], "-c:v"), Some("h264_nvenc"));
    assert_eq!(value_after(&calls[0], "-rc:v"), Some("vbr"));
    assert_eq!(value_after(&calls[0], "-bufsize:v"), Some("10M"));
    assert_eq!(value_after(&calls[1], "-c:v"), Some("libx264"));
    assert_eq!(value_after(&calls[1], "-crf"), Some("23"));
    assert_eq!(value_after(&calls[1], "-rc:v"), None);

    // everything but the video codec settings is identical
    for args in &calls {
        assert_eq!(args[0], "-y");
        assert_eq!(value_after(args, "-r"), Some("30"));
        assert_eq!(value_after(args, "-pix_fmt"), Some("yuv420p"));
        assert_eq!(value_after(args, "-c:a"), Some("aac"));
        assert_eq!(value_after(args, "-b:a"), Some("192k"));
        assert_eq!(args.last().map(String::as_str), Some("out/final.mp4"));
    }
    assert_eq!(value_after(&calls[0], "-filter_complex"), value_after(&calls[1], "-filter_complex"));
}

#[test]
fn test_no_third_attempt() {
    let tools = Arc::new(FakeTools::new("", vec![1, 1, 0]));
    let adapter = FFmpegAdapter::new("ffmpeg", EncodeSettings::default(), tools.clone());

    let result = adapter.encode(&job(1)).unwrap();
    assert!(!result.success);
    assert_eq!(result.attempts, 2);
    assert_eq!(result.diagnostics, "encoder exited with 1");
    assert_eq!(tools.encode_calls().len(), 2);
}

#[test]
fn test_software_only_when_hardware_disabled() {
    let tools = Arc::new(FakeTools::new("", vec![1]));
    let settings = EncodeSettings {
        hardware_enabled: false,
        ..EncodeSettings::default()
    };
    let adapter = FFmpegAdapter::new("ffmpeg", settings, tools.clone());

    let result = adapter.encode(&job(1)).unwrap();
    assert!(!result.success);
    assert_eq!(result.attempts, 1);
    assert_eq!(result.profile, ProfileKind::Software);
    assert_eq!(value_after(&tools.encode_calls()[0], "-c:v"), Some("libx264"));
}

#[test]
fn test_input_order_and_maps() {
    let tools = Arc::new(FakeTools::new("", vec![0]));
    let adapter = FFmpegAdapter::new("ffmpeg", EncodeSettings::default(), tools.clone());
    adapter.encode(&job(3)).unwrap();

    let args = &tools.encode_calls()[0];
    let inputs: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "-i")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(inputs, vec!["clip0.mp4", "clip1.mp4", "clip2.mp4", "voice.wav"]);

    let graph = value_after(args, "-filter_complex").unwrap();
    assert!(graph.contains("[3:a]asetpts=PTS-STARTPTS[afinal]"));
    let maps: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "-map")
        .map(|w| w[1].as_str())
        .collect();
    assert_eq!(maps, vec!["[base]", "[afinal]"]);
}

#[test]
fn test_custom_software_profile() {
    let tools = Arc::new(FakeTools::new("", vec![0]));
    let settings = EncodeSettings {
        hardware_enabled: false,
        software: EncodeProfile {
            codec: "libx265".to_string(),
            preset: Some("slow".to_string()),
            rate_control: None,
            bitrate: None,
            max_rate: None,
            buffer_size: None,
            crf: Some(28),
        },
        ..EncodeSettings::default()
    };
    let adapter = FFmpegAdapter::new("/opt/ffmpeg/bin/ffmpeg", settings, tools.clone());
    adapter.encode(&job(1)).unwrap();

    assert_eq!(tools.programs(), vec![PathBuf::from("/opt/ffmpeg/bin/ffmpeg")]);
    let args = &tools.encode_calls()[0];
    assert_eq!(value_after(args, "-c:v"), Some("libx265"));
    assert_eq!(value_after(args, "-preset"), Some("slow"));
    assert_eq!(value_after(args, "-crf"), Some("28"));
}
