//! Typed filter records and their textual rendering
//!
//! Filters are plain data until [`Filter::render`] turns them into the
//! transcoder's filter syntax. Escaping happens only here.

use std::fmt;

use serde::Serialize;

/// How `scale` treats the source aspect ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// Grow until both dimensions cover the target (then crop)
    Increase,
}

impl AspectMode {
    fn as_str(&self) -> &'static str {
        match self {
            AspectMode::Increase => "increase",
        }
    }
}

/// A positioned text overlay restricted to a time window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawText {
    /// Raw, unescaped display text
    pub text: String,
    /// Font size expression, e.g. `h/18`
    pub font_size: String,
    pub font_color: String,
    pub font_file: Option<String>,
    pub box_color: String,
    /// Horizontal position expression
    pub x: String,
    /// Vertical position expression
    pub y: String,
    pub start: f64,
    pub end: f64,
    /// Also draw on a frame at exactly `end`. Otherwise the window is
    /// `[start, end)` so adjacent overlays never share a frame.
    pub closed_end: bool,
}

/// One step of a filter chain
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "filter", rename_all = "snake_case")]
pub enum Filter {
    /// Keep `[start, end]` seconds of the stream
    Trim { start: f64, end: f64 },
    /// Restart video timestamps at zero
    ResetVideoPts,
    /// Restart audio timestamps at zero
    ResetAudioPts,
    Scale {
        width: u32,
        height: u32,
        aspect: AspectMode,
    },
    /// Centre crop to the exact size
    Crop { width: u32, height: u32 },
    /// Force square pixels
    SquarePixels,
    Concat {
        segments: usize,
        video: usize,
        audio: usize,
    },
    DrawText(DrawText),
}

impl Filter {
    /// Filter name in the transcoder's vocabulary
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Trim { .. } => "trim",
            Filter::ResetVideoPts => "setpts",
            Filter::ResetAudioPts => "asetpts",
            Filter::Scale { .. } => "scale",
            Filter::Crop { .. } => "crop",
            Filter::SquarePixels => "setsar",
            Filter::Concat { .. } => "concat",
            Filter::DrawText(_) => "drawtext",
        }
    }

    /// Render as `name=args`
    pub fn render(&self) -> String {
        match self {
            Filter::Trim { start, end } => format!("trim={}:{}", start, end),
            Filter::ResetVideoPts => "setpts=PTS-STARTPTS".to_string(),
            Filter::ResetAudioPts => "asetpts=PTS-STARTPTS".to_string(),
            Filter::Scale {
                width,
                height,
                aspect,
            } => format!(
                "scale={}:{}:force_original_aspect_ratio={}",
                width,
                height,
                aspect.as_str()
            ),
            Filter::Crop { width, height } => format!("crop={}:{}", width, height),
            Filter::SquarePixels => "setsar=1:1".to_string(),
            Filter::Concat {
                segments,
                video,
                audio,
            } => format!("concat=n={}:v={}:a={}", segments, video, audio),
            Filter::DrawText(spec) => render_drawtext(spec),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_drawtext(spec: &DrawText) -> String {
    let mut out = format!("drawtext=text={}", escape_text(&spec.text));
    if let Some(font_file) = &spec.font_file {
        out.push_str(&format!(":fontfile={}", escape_text(font_file)));
    }
    let window = if spec.closed_end {
        format!("between(t,{},{})", spec.start, spec.end)
    } else {
        format!("gte(t,{})*lt(t,{})", spec.start, spec.end)
    };
    out.push_str(&format!(
        ":expansion=none:fontsize={}:fontcolor={}:box=1:boxcolor={}:x={}:y={}:enable='{}'",
        spec.font_size, spec.font_color, spec.box_color, spec.x, spec.y, window
    ));
    out
}

/// Escape a literal for use as a filter option value inside a filter graph.
///
/// Two parsers see the value: the option parser (`\`, `'` and `:` are special)
/// and then, outermost, the graph parser (`\`, `'`, `[`, `]`, `,` and `;`).
/// Line breaks are flattened to spaces.
pub fn escape_text(raw: &str) -> String {
    let flattened: String = raw
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    escape_chars(&escape_chars(&flattened, &['\\', '\'', ':']), &[
        '\\', '\'', '[', ']', ',', ';',
    ])
}

fn escape_chars(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
